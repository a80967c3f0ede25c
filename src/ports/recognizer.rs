//! Recognizer Port - Interface for language understanding services.
//!
//! A recognizer turns one utterance into intent scores and extracted
//! entities. Dialogs never call it directly: the dialog manager recognizes
//! each message once and hands the result to the turn engine.
//!
//! # Degradation
//!
//! A recognizer that is not configured, or fails, must never stop a turn.
//! Callers treat any error as an empty recognition: no interruption fires,
//! no idle intent matches, and free-text steps still accept the answer.

use async_trait::async_trait;

use crate::domain::booking::Recognition;

/// Port for intent and entity recognition.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Returns false when the service is missing settings and every call
    /// would fail.
    fn is_configured(&self) -> bool;

    /// Recognizes one utterance.
    async fn recognize(&self, utterance: &str) -> Result<Recognition, RecognizerError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Recognizer errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecognizerError {
    /// Required settings are missing.
    #[error("recognizer not configured")]
    NotConfigured,

    /// API key was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Service answered with an error status.
    #[error("service error {status}: {message}")]
    Service { status: u16, message: String },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl RecognizerError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_readably() {
        assert_eq!(RecognizerError::NotConfigured.to_string(), "recognizer not configured");
        assert_eq!(
            RecognizerError::Timeout { timeout_secs: 5 }.to_string(),
            "request timed out after 5s"
        );
        assert_eq!(
            RecognizerError::Service { status: 429, message: "slow down".into() }.to_string(),
            "service error 429: slow down"
        );
    }
}
