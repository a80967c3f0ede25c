//! Mock Recognizer for testing.
//!
//! Returns scripted recognitions in order, then empty ones, and records
//! every utterance it was asked about.
//!
//! # Example
//!
//! ```ignore
//! let recognizer = MockRecognizer::new()
//!     .with_intent(Intent::Booking)
//!     .with_intent(Intent::Cancel);
//!
//! let first = recognizer.recognize("book a room").await?;
//! assert!(first.is_top(Intent::Booking));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::booking::{Intent, Recognition};
use crate::ports::{Recognizer, RecognizerError};

/// A scripted answer of the mock.
#[derive(Debug, Clone)]
enum Scripted {
    Recognition(Recognition),
    Error(RecognizerError),
}

/// Mock recognizer for testing.
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<String>>>,
    configured: bool,
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRecognizer {
    /// Creates a configured mock with an empty script.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            configured: true,
        }
    }

    /// Creates a mock that reports itself as not configured.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Queues a full recognition. Its text is replaced by the utterance.
    pub fn with_recognition(self, recognition: Recognition) -> Self {
        self.push(Scripted::Recognition(recognition));
        self
    }

    /// Queues a recognition whose only intent is `intent` at full score.
    pub fn with_intent(self, intent: Intent) -> Self {
        self.with_recognition(Recognition::default().with_intent(intent, 1.0))
    }

    /// Queues an error.
    pub fn with_error(self, error: RecognizerError) -> Self {
        self.push(Scripted::Error(error));
        self
    }

    /// Returns the number of calls made to this recognizer.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns all recognized utterances.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, scripted: Scripted) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(scripted);
    }

    fn next_scripted(&self) -> Option<Scripted> {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

#[async_trait]
impl Recognizer for MockRecognizer {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn recognize(&self, utterance: &str) -> Result<Recognition, RecognizerError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(utterance.to_string());

        match self.next_scripted() {
            Some(Scripted::Recognition(recognition)) => Ok(Recognition {
                text: utterance.to_string(),
                ..recognition
            }),
            Some(Scripted::Error(error)) => Err(error),
            None => Ok(Recognition::empty(utterance)),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::EntityCategory;

    #[tokio::test]
    async fn returns_scripted_recognitions_in_order() {
        let recognizer = MockRecognizer::new()
            .with_intent(Intent::Booking)
            .with_recognition(
                Recognition::default().with_entity(EntityCategory::Adults, "2"),
            );

        let first = recognizer.recognize("book").await.unwrap();
        assert!(first.is_top(Intent::Booking));
        assert_eq!(first.text, "book");

        let second = recognizer.recognize("two of us").await.unwrap();
        assert_eq!(second.first_entity(EntityCategory::Adults), Some("2"));
    }

    #[tokio::test]
    async fn returns_empty_recognition_after_script_is_exhausted() {
        let recognizer = MockRecognizer::new();
        let recognition = recognizer.recognize("hello").await.unwrap();
        assert_eq!(recognition, Recognition::empty("hello"));
    }

    #[tokio::test]
    async fn returns_scripted_error() {
        let recognizer = MockRecognizer::new().with_error(RecognizerError::network("down"));
        let result = recognizer.recognize("hello").await;
        assert_eq!(result, Err(RecognizerError::network("down")));
    }

    #[tokio::test]
    async fn tracks_calls_across_clones() {
        let recognizer = MockRecognizer::new();
        let clone = recognizer.clone();

        clone.recognize("one").await.unwrap();
        recognizer.recognize("two").await.unwrap();

        assert_eq!(recognizer.call_count(), 2);
        assert_eq!(recognizer.get_calls(), vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn unconfigured_mock_reports_it() {
        assert!(!MockRecognizer::unconfigured().is_configured());
        assert!(MockRecognizer::new().is_configured());
    }
}
