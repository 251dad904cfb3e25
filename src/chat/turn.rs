//! Turn preparation shared by streamed and single-shot replies

use super::persona::{profile_note, PERSONA_PROMPT};
use crate::llm::ChatMessage;
use crate::session::{advance, SessionContext, UserInfoExtractor};
use chrono::{DateTime, Utc};

/// Fold `message` into the session and build the outbound message list.
///
/// Order matters: the extractor runs first so the stage transition sees this
/// turn's signals, and the stage is advanced before the user turn is appended
/// because appending refreshes `last_interaction`.
pub fn prepare_turn(
    context: &mut SessionContext,
    extractor: &dyn UserInfoExtractor,
    message: &str,
    now: DateTime<Utc>,
) -> Vec<ChatMessage> {
    extractor.extract(message, &mut context.user_info);

    let previous_stage = context.conversation_stage;
    advance(context, now);
    if context.conversation_stage != previous_stage {
        tracing::info!(
            session_id = %context.session_id,
            from = %previous_stage,
            to = %context.conversation_stage,
            "Conversation stage changed"
        );
    }

    context.append(ChatMessage::user(message), now);

    let mut messages = Vec::with_capacity(context.conversation_history.len() + 2);
    messages.push(ChatMessage::system(PERSONA_PROMPT));
    if let Some(note) = profile_note(&context.user_info, context.conversation_stage) {
        messages.push(ChatMessage::system(note));
    }
    messages.extend(context.conversation_history.iter().cloned());
    messages
}
