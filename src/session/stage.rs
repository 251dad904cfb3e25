//! Conversation stage transitions
//!
//! Pure state update: given the session and the current time, move the stage
//! at most one step forward, or back to the start if the session went cold.

use super::{ConversationStage, SessionContext};
use chrono::{DateTime, Duration, Utc};

/// Idle seconds after which a session starts over at `Greeting`
pub const COLD_SESSION_SECS: i64 = 1800;

const TRAITS_TO_EXPLORE: usize = 2;
const SCENTS_TO_REFINE: usize = 2;

/// Advance the stage of `context`.
///
/// Must run after the extractor has seen the current message, so signals from
/// this turn can move the stage in the same turn.
pub fn advance(context: &mut SessionContext, now: DateTime<Utc>) {
    if now - context.last_interaction > Duration::seconds(COLD_SESSION_SECS) {
        context.conversation_stage = ConversationStage::Greeting;
        return;
    }

    if let Some(next) = next_stage(context) {
        context.conversation_stage = next;
    }
}

fn next_stage(context: &SessionContext) -> Option<ConversationStage> {
    let info = &context.user_info;
    match context.conversation_stage {
        ConversationStage::Greeting if info.name.is_some() => {
            Some(ConversationStage::GettingToKnow)
        }
        ConversationStage::GettingToKnow if info.personality_traits.len() >= TRAITS_TO_EXPLORE => {
            Some(ConversationStage::ExploringPreferences)
        }
        ConversationStage::ExploringPreferences
            if info.mentioned_scents.len() >= SCENTS_TO_REFINE =>
        {
            Some(ConversationStage::RefiningSelection)
        }
        _ => None,
    }
}
