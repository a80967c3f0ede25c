//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Recognizer` - Intent and entity recognition for one utterance
//! - `ConversationStore` - Persistence of conversation records between turns

mod conversation_store;
mod recognizer;

pub use conversation_store::{ConversationStore, ConversationStoreError};
pub use recognizer::{Recognizer, RecognizerError};
