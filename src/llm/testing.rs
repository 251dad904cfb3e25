//! Scripted LLM service for tests

use super::{LlmError, LlmRequest, LlmResponse, LlmService, TextStream, Usage};
use async_trait::async_trait;
use futures::stream;
use futures::StreamExt;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted upstream behaviour
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Stream these fragments, then end normally
    Fragments(Vec<String>),
    /// Fail before producing anything
    FailToStart(LlmError),
    /// Stream these fragments, then break off with the error
    FailMidStream(Vec<String>, LlmError),
    /// Stream these fragments, then never produce another item
    Stall(Vec<String>),
}

impl MockReply {
    pub fn text(fragments: &[&str]) -> Self {
        MockReply::Fragments(fragments.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Mock LLM service that plays back queued replies
pub struct MockLlmService {
    replies: Mutex<VecDeque<MockReply>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(self, reply: MockReply) -> Self {
        self.queue(reply);
        self
    }

    pub fn queue(&self, reply: MockReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self, request: &LlmRequest) -> MockReply {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::FailToStart(LlmError::network("No mock reply queued")))
    }
}

fn ok_items(fragments: Vec<String>) -> impl futures::Stream<Item = Result<String, LlmError>> {
    stream::iter(fragments.into_iter().map(Ok))
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        match self.next_reply(request) {
            MockReply::Fragments(fragments) | MockReply::Stall(fragments) => Ok(LlmResponse {
                text: fragments.concat(),
                finish_reason: Some("stop".to_string()),
                usage: Usage::default(),
            }),
            MockReply::FailToStart(e) | MockReply::FailMidStream(_, e) => Err(e),
        }
    }

    async fn stream(&self, request: &LlmRequest) -> Result<TextStream, LlmError> {
        match self.next_reply(request) {
            MockReply::Fragments(fragments) => Ok(Box::pin(ok_items(fragments))),
            MockReply::FailToStart(e) => Err(e),
            MockReply::FailMidStream(fragments, e) => {
                Ok(Box::pin(ok_items(fragments).chain(stream::once(async move { Err(e) }))))
            }
            MockReply::Stall(fragments) => {
                Ok(Box::pin(ok_items(fragments).chain(stream::pending())))
            }
        }
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}
