//! Storage Adapters
//!
//! Implementations of the ConversationStore port.
//!
//! ## Available Adapters
//!
//! - **FileConversationStore** - Stores records as YAML files on disk
//! - **InMemoryConversationStore** - Stores records in memory (testing/development)
//!
//! The PostgreSQL store lives in `adapters::postgres`.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileConversationStore, InMemoryConversationStore};
//!
//! // Production: file-based storage
//! let store = FileConversationStore::new("./data/conversations");
//!
//! // Testing: in-memory storage
//! let store = InMemoryConversationStore::new();
//! ```

mod file_conversation_store;
mod in_memory_conversation_store;

pub use file_conversation_store::FileConversationStore;
pub use in_memory_conversation_store::InMemoryConversationStore;
