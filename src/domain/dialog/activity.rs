//! Inbound activities delivered by a channel.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Activity {
    /// A user typed something.
    Message { text: String },
    /// Someone joined the conversation.
    ConversationUpdate,
}

impl Activity {
    pub fn message(text: impl Into<String>) -> Self {
        Activity::Message { text: text.into() }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Activity::Message { text } => Some(text),
            Activity::ConversationUpdate => None,
        }
    }

    pub fn is_message(&self) -> bool {
        matches!(self, Activity::Message { .. })
    }
}
