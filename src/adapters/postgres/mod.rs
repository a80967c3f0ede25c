//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! - `PostgresConversationStore` - Conversation records keyed by channel conversation id

mod conversation_store;

pub use conversation_store::PostgresConversationStore;
