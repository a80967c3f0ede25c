//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Longest conversation id accepted from a channel.
const MAX_CONVERSATION_ID_LEN: usize = 256;

/// Channel-assigned identifier of one conversation.
///
/// Channels hand out opaque strings rather than UUIDs, so the id is kept
/// as text and only checked for being non-empty and reasonably short.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Creates a new ConversationId, returning error if empty or oversized.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("conversation_id"));
        }
        if trimmed.len() > MAX_CONVERSATION_ID_LEN {
            return Err(ValidationError::invalid_format(
                "conversation_id",
                format!("longer than {} characters", MAX_CONVERSATION_ID_LEN),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier for one processed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(Uuid);

impl TurnId {
    /// Creates a new random TurnId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TurnId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TurnId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_id_accepts_channel_strings() {
        let id = ConversationId::new("webchat:7f3a-42").unwrap();
        assert_eq!(id.as_str(), "webchat:7f3a-42");
    }

    #[test]
    fn conversation_id_trims_whitespace() {
        let id = ConversationId::new("  abc  ").unwrap();
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn conversation_id_rejects_empty_string() {
        let result = ConversationId::new("   ");
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn conversation_id_rejects_oversized_string() {
        let result = ConversationId::new("x".repeat(MAX_CONVERSATION_ID_LEN + 1));
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn conversation_id_serializes_transparently() {
        let id: ConversationId = "conv-1".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"conv-1\"");
    }

    #[test]
    fn turn_id_generates_unique_values() {
        assert_ne!(TurnId::new(), TurnId::new());
    }

    #[test]
    fn turn_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TurnId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }
}
