//! Recognizer used when no language understanding service is set up.
//!
//! Every call fails with `NotConfigured`; the dialog manager never calls it
//! because `is_configured` is false, and treats the turn as recognizing
//! nothing.

use async_trait::async_trait;

use crate::domain::booking::Recognition;
use crate::ports::{Recognizer, RecognizerError};

#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredRecognizer;

#[async_trait]
impl Recognizer for UnconfiguredRecognizer {
    fn is_configured(&self) -> bool {
        false
    }

    async fn recognize(&self, _utterance: &str) -> Result<Recognition, RecognizerError> {
        Err(RecognizerError::NotConfigured)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
