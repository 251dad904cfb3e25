//! Session state types

use crate::llm::ChatMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the conversation currently is.
///
/// Variants are declared in progression order; the derived `Ord` is what
/// the monotonicity checks compare against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    #[default]
    Greeting,
    GettingToKnow,
    ExploringPreferences,
    RefiningSelection,
}

impl ConversationStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationStage::Greeting => "greeting",
            ConversationStage::GettingToKnow => "getting_to_know",
            ConversationStage::ExploringPreferences => "exploring_preferences",
            ConversationStage::RefiningSelection => "refining_selection",
        }
    }
}

impl fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What has been gleaned about the user so far.
///
/// The list fields behave as insertion-ordered sets: values are only
/// appended when not already present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: Option<String>,
    pub personality_traits: Vec<String>,
    pub style: Option<String>,
    pub mentioned_scents: Vec<String>,
    pub scent_preferences: Vec<String>,
}

impl UserInfo {
    /// Set the name unless one is already known. Returns whether it was set.
    pub fn set_name_once(&mut self, name: String) -> bool {
        if self.name.is_some() {
            return false;
        }
        self.name = Some(name);
        true
    }

    pub fn add_scent_preference(&mut self, category: &str) -> bool {
        push_unique(&mut self.scent_preferences, category)
    }

    pub fn add_personality_trait(&mut self, trait_name: &str) -> bool {
        push_unique(&mut self.personality_traits, trait_name)
    }

    pub fn add_mentioned_scent(&mut self, scent: &str) -> bool {
        push_unique(&mut self.mentioned_scents, scent)
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) -> bool {
    if values.iter().any(|v| v == value) {
        return false;
    }
    values.push(value.to_string());
    true
}

/// One active conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub last_interaction: DateTime<Utc>,
    pub conversation_stage: ConversationStage,
    /// Replay order sent to the model. The persona prompt is not stored here;
    /// it is prepended when a request is built.
    pub conversation_history: Vec<ChatMessage>,
    pub user_info: UserInfo,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self::new_at(session_id, Utc::now())
    }

    pub fn new_at(session_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            last_interaction: now,
            conversation_stage: ConversationStage::Greeting,
            conversation_history: Vec::new(),
            user_info: UserInfo::default(),
        }
    }

    /// Append a message to the history and touch `last_interaction`
    pub fn append(&mut self, message: ChatMessage, at: DateTime<Utc>) {
        self.conversation_history.push(message);
        self.last_interaction = at;
    }
}
