//! In-Memory Conversation Store Adapter
//!
//! Keeps conversation records in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialog::ConversationRecord;
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, ConversationStoreError};

/// In-memory storage for conversation records
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    records: Arc<RwLock<HashMap<ConversationId, ConversationRecord>>>,
}

impl InMemoryConversationStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored records (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Get the number of stored records
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn save_state(
        &self,
        id: &ConversationId,
        record: &ConversationRecord,
    ) -> Result<(), ConversationStoreError> {
        let mut records = self.records.write().await;
        records.insert(id.clone(), record.clone());
        Ok(())
    }

    async fn load_state(
        &self,
        id: &ConversationId,
    ) -> Result<ConversationRecord, ConversationStoreError> {
        let records = self.records.read().await;
        records
            .get(id)
            .cloned()
            .ok_or_else(|| ConversationStoreError::NotFound(id.clone()))
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), ConversationStoreError> {
        self.records.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::SlotBag;
    use crate::domain::dialog::{DialogFrame, FrameOptions};

    fn test_id(s: &str) -> ConversationId {
        ConversationId::new(s).unwrap()
    }

    fn test_record(id: &ConversationId) -> ConversationRecord {
        let mut record = ConversationRecord::new(id.clone());
        record.stack.push(DialogFrame::begin(FrameOptions::Booking(SlotBag {
            guests: Some(3),
            ..SlotBag::default()
        })));
        record
    }

    #[tokio::test]
    async fn test_memory_store_save_and_load() {
        let store = InMemoryConversationStore::new();
        let id = test_id("conv-1");
        let record = test_record(&id);

        store.save_state(&id, &record).await.unwrap();
        let loaded = store.load_state(&id).await.unwrap();

        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_memory_store_load_nonexistent() {
        let store = InMemoryConversationStore::new();
        let result = store.load_state(&test_id("missing")).await;

        assert!(matches!(result, Err(ConversationStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_memory_store_delete() {
        let store = InMemoryConversationStore::new();
        let id = test_id("conv-2");

        store.save_state(&id, &test_record(&id)).await.unwrap();
        assert_eq!(store.record_count().await, 1);

        store.delete(&id).await.unwrap();
        assert!(matches!(
            store.load_state(&id).await,
            Err(ConversationStoreError::NotFound(_))
        ));
        assert_eq!(store.record_count().await, 0);

        // Deleting again is fine
        store.delete(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_store_overwrites_record() {
        let store = InMemoryConversationStore::new();
        let id = test_id("conv-3");
        let mut record = test_record(&id);
        store.save_state(&id, &record).await.unwrap();

        record.stack.clear();
        record.turn_count = 4;
        store.save_state(&id, &record).await.unwrap();

        let loaded = store.load_state(&id).await.unwrap();
        assert!(loaded.stack.is_empty());
        assert_eq!(loaded.turn_count, 4);
        assert_eq!(store.record_count().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_clear() {
        let store = InMemoryConversationStore::new();
        for name in ["a", "b"] {
            let id = test_id(name);
            store.save_state(&id, &test_record(&id)).await.unwrap();
        }
        assert_eq!(store.record_count().await, 2);

        store.clear().await;
        assert_eq!(store.record_count().await, 0);
    }

    #[tokio::test]
    async fn test_memory_store_shared_between_clones() {
        let store = InMemoryConversationStore::new();
        let writer = store.clone();
        let id = test_id("conv-4");
        let record = test_record(&id);

        let handle = {
            let id = id.clone();
            tokio::spawn(async move { writer.save_state(&id, &record).await.unwrap() })
        };
        handle.await.unwrap();

        assert!(store.load_state(&id).await.is_ok());
    }
}
