//! Errors surfaced by the application layer.

use thiserror::Error;

use crate::domain::dialog::DialogError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::ConversationStoreError;

/// Errors that can occur while processing a turn.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The stored conversation could not be resumed. It has been reset to idle.
    #[error("Corrupt conversation state: {0}")]
    CorruptState(String),

    /// The conversation store failed.
    #[error("Storage error: {0}")]
    Store(#[from] ConversationStoreError),

    /// A record update was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<DialogError> for EngineError {
    fn from(err: DialogError) -> Self {
        EngineError::CorruptState(err.to_string())
    }
}

impl EngineError {
    /// Error code reported to callers.
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::CorruptState(_) => ErrorCode::CorruptState,
            EngineError::Store(ConversationStoreError::NotFound(_)) => {
                ErrorCode::ConversationNotFound
            }
            EngineError::Store(ConversationStoreError::DeserializationFailed(_)) => {
                ErrorCode::CorruptState
            }
            EngineError::Store(_) => ErrorCode::StorageError,
            EngineError::Validation(ValidationError::InvalidFormat { .. }) => {
                ErrorCode::InvalidStateTransition
            }
            EngineError::Validation(err) => ErrorCode::from(err),
        }
    }
}

impl From<EngineError> for DomainError {
    fn from(err: EngineError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
