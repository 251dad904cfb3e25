//! Paced streaming of model replies
//!
//! A reply is a lazy fragment sequence. Nothing happens until the consumer
//! polls it; dropping it (client disconnect) abandons the turn at the next
//! suspension point without recording an assistant message.

use super::pacing::{FragmentBuffer, PacingConfig};
use super::turn::prepare_turn;
use crate::llm::{ChatMessage, LlmError, LlmRequest, LlmService};
use crate::session::{SessionHandle, UserInfoExtractor};
use chrono::Utc;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;

/// Sent in place of a reply when the model call cannot be started
pub const START_APOLOGY: &str =
    "Oh no, I'm so sorry! I can't seem to gather my thoughts right now. Could you try again in a moment?";

/// Appended when the model breaks off part-way through a reply
pub const MID_STREAM_APOLOGY: &str =
    " ...ugh, sorry, I totally lost my train of thought there! Could you say that again?";

const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 500;
const REPLY_MAX_TOKENS: u32 = 800;
const PRESENCE_PENALTY: f32 = 0.6;

/// Text fragments as they should be written to the client
pub type FragmentStream = Pin<Box<dyn Stream<Item = String> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Streaming,
    Completed,
    Failed,
}

/// Tracks a streamed turn; logs if it is dropped before reaching an end state
struct TurnGuard {
    session_id: String,
    phase: Phase,
}

impl TurnGuard {
    fn new(session_id: String) -> Self {
        Self {
            session_id,
            phase: Phase::Streaming,
        }
    }

    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

impl Drop for TurnGuard {
    fn drop(&mut self) {
        if self.phase == Phase::Streaming {
            tracing::warn!(
                session_id = %self.session_id,
                "Client went away mid-reply, reply not recorded"
            );
        }
    }
}

/// Runs chat turns against the model
#[derive(Clone)]
pub struct ResponseStreamer {
    llm: Arc<dyn LlmService>,
    extractor: Arc<dyn UserInfoExtractor>,
    pacing: PacingConfig,
}

impl ResponseStreamer {
    pub fn new(llm: Arc<dyn LlmService>, extractor: Arc<dyn UserInfoExtractor>) -> Self {
        Self {
            llm,
            extractor,
            pacing: PacingConfig::default(),
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Update the session for the incoming message and build the model messages
    async fn begin_turn(&self, session: &SessionHandle, message: &str) -> (String, Vec<ChatMessage>) {
        let mut context = session.lock().await;
        let messages = prepare_turn(&mut context, self.extractor.as_ref(), message, Utc::now());
        (context.session_id.clone(), messages)
    }

    /// Stream a reply to `message`.
    ///
    /// Upstream failures never surface as errors: the sequence ends with an
    /// apology fragment instead, and no assistant message is recorded.
    #[allow(unused_assignments)]
    pub fn stream(&self, session: SessionHandle, message: String) -> FragmentStream {
        let this = self.clone();

        Box::pin(async_stream::stream! {
            let (session_id, messages) = this.begin_turn(&session, &message).await;
            let mut guard = TurnGuard::new(session_id.clone());

            let request = LlmRequest {
                messages,
                temperature: Some(TEMPERATURE),
                max_tokens: Some(MAX_TOKENS),
                presence_penalty: None,
            };

            let mut upstream = match this.llm.stream(&request).await {
                Ok(upstream) => upstream,
                Err(e) => {
                    tracing::error!(session_id = %session_id, error = %e, "Reply failed to start");
                    guard.finish(Phase::Failed);
                    yield START_APOLOGY.to_string();
                    return;
                }
            };

            let mut buffer = FragmentBuffer::new(this.pacing);
            let mut full_response = String::new();
            let mut emitted = 0usize;

            while let Some(item) = upstream.next().await {
                match item {
                    Ok(text) => {
                        if buffer.push(&text) {
                            if let Some(chunk) = buffer.take() {
                                tokio::time::sleep(this.pacing.typing_delay()).await;
                                full_response.push_str(&chunk);
                                emitted += 1;
                                yield chunk;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::error!(
                            session_id = %session_id,
                            error = %e,
                            emitted,
                            "Reply broke off mid-stream"
                        );
                        guard.finish(Phase::Failed);
                        if let Some(chunk) = buffer.take() {
                            tokio::time::sleep(this.pacing.typing_delay()).await;
                            emitted += 1;
                            yield chunk;
                        }
                        yield MID_STREAM_APOLOGY.to_string();
                        return;
                    }
                }
            }

            if let Some(chunk) = buffer.take() {
                tokio::time::sleep(this.pacing.typing_delay()).await;
                full_response.push_str(&chunk);
                emitted += 1;
                yield chunk;
            }

            let chars = full_response.chars().count();
            session
                .lock()
                .await
                .append(ChatMessage::assistant(full_response), Utc::now());
            guard.finish(Phase::Completed);

            tracing::info!(session_id = %session_id, fragments = emitted, chars, "Reply streamed");
        })
    }

    /// Produce a whole reply in one call.
    ///
    /// On failure the user turn stays in history and the error is returned.
    pub async fn reply(&self, session: &SessionHandle, message: &str) -> Result<String, LlmError> {
        let (session_id, messages) = self.begin_turn(session, message).await;

        let request = LlmRequest {
            messages,
            temperature: Some(TEMPERATURE),
            max_tokens: Some(REPLY_MAX_TOKENS),
            presence_penalty: Some(PRESENCE_PENALTY),
        };

        let response = self.llm.complete(&request).await.map_err(|e| {
            tracing::error!(session_id = %session_id, error = %e, "Reply failed");
            e
        })?;

        session
            .lock()
            .await
            .append(ChatMessage::assistant(response.text.clone()), Utc::now());

        Ok(response.text)
    }
}
