//! Per-conversation session state
//!
//! A session carries the chat history plus two pieces of derived state: a
//! best-effort profile of the user and the conversation stage label.

mod context;
mod extractor;
mod stage;
mod store;

#[cfg(test)]
mod proptests;

pub use context::{ConversationStage, SessionContext, UserInfo};
pub use extractor::{KeywordExtractor, UserInfoExtractor};
pub use stage::advance;
pub use store::{InMemorySessionStore, SessionHandle, SessionStore};
