//! Recognizer adapters - Implementations of the Recognizer port.
//!
//! - `CluRecognizer` - Azure Conversational Language Understanding over HTTP
//! - `KeywordRecognizer` - Local whole-word rules, no service needed
//! - `UnconfiguredRecognizer` - Stand-in when nothing is configured
//! - `MockRecognizer` - Scripted recognitions for tests

mod clu;
mod keyword;
mod mock;
mod unconfigured;

pub use clu::{parse_analyze_response, CluConfig, CluRecognizer};
pub use keyword::{KeywordRecognizer, KEYWORD_SCORE};
pub use mock::MockRecognizer;
pub use unconfigured::UnconfiguredRecognizer;
