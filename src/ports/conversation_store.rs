//! Conversation Store Port - Interface for persisting conversation records.
//!
//! The dialog manager loads a record at the start of a turn and saves it
//! exactly once at the end, so implementations only need whole-record
//! reads and writes.

use async_trait::async_trait;

use crate::domain::dialog::ConversationRecord;
use crate::domain::foundation::ConversationId;

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum ConversationStoreError {
    #[error("Conversation not found: {0}")]
    NotFound(ConversationId),

    #[error("Failed to serialize conversation: {0}")]
    SerializationFailed(String),

    /// The stored record exists but cannot be read back.
    #[error("Failed to deserialize conversation: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Port for persisting and loading conversation records
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Save a conversation record, replacing any previous one.
    ///
    /// # Errors
    /// Returns `ConversationStoreError` if save fails
    async fn save_state(
        &self,
        id: &ConversationId,
        record: &ConversationRecord,
    ) -> Result<(), ConversationStoreError>;

    /// Load a conversation record.
    ///
    /// # Errors
    /// Returns `ConversationStoreError::NotFound` if no record exists and
    /// `DeserializationFailed` if the stored record is unreadable
    async fn load_state(
        &self,
        id: &ConversationId,
    ) -> Result<ConversationRecord, ConversationStoreError>;

    /// Delete a record. Deleting a missing record is not an error.
    async fn delete(&self, id: &ConversationId) -> Result<(), ConversationStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_conversation() {
        let err = ConversationStoreError::NotFound(ConversationId::new("conv-9").unwrap());
        assert_eq!(err.to_string(), "Conversation not found: conv-9");
    }

    #[test]
    fn deserialization_error_mentions_cause() {
        let err = ConversationStoreError::DeserializationFailed("unknown variant `flight`".into());
        assert!(err.to_string().contains("deserialize"));
        assert!(err.to_string().contains("flight"));
    }
}
