//! File-based Conversation Store Adapter
//!
//! Stores each conversation record as a YAML file on disk, one file per
//! conversation, for easy inspection and debugging.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::dialog::ConversationRecord;
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, ConversationStoreError};

/// File-based storage for conversation records
#[derive(Debug, Clone)]
pub struct FileConversationStore {
    base_path: PathBuf,
}

impl FileConversationStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileConversationStore::new("./data/conversations");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the record file path for a conversation.
    ///
    /// Channel ids may contain characters that are not safe in file names,
    /// so everything outside `[A-Za-z0-9_-]` is hex-escaped.
    fn record_path(&self, id: &ConversationId) -> PathBuf {
        let mut name = String::with_capacity(id.as_str().len());
        for byte in id.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                name.push(byte as char);
            } else {
                name.push_str(&format!("%{:02X}", byte));
            }
        }
        self.base_path.join(format!("{}.yaml", name))
    }

    /// Ensure the base directory exists
    async fn ensure_dir(&self) -> Result<(), ConversationStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| ConversationStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl ConversationStore for FileConversationStore {
    async fn save_state(
        &self,
        id: &ConversationId,
        record: &ConversationRecord,
    ) -> Result<(), ConversationStoreError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(record)
            .map_err(|e| ConversationStoreError::SerializationFailed(e.to_string()))?;

        // Write to a sibling file first so a crash never leaves half a record
        let file_path = self.record_path(id);
        let tmp_path = file_path.with_extension("yaml.tmp");
        fs::write(&tmp_path, yaml)
            .await
            .map_err(|e| ConversationStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp_path, &file_path)
            .await
            .map_err(|e| ConversationStoreError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn load_state(
        &self,
        id: &ConversationId,
    ) -> Result<ConversationRecord, ConversationStoreError> {
        let file_path = self.record_path(id);

        if !file_path.exists() {
            return Err(ConversationStoreError::NotFound(id.clone()));
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| ConversationStoreError::IoError(e.to_string()))?;

        serde_yaml::from_str(&yaml)
            .map_err(|e| ConversationStoreError::DeserializationFailed(e.to_string()))
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), ConversationStoreError> {
        let file_path = self.record_path(id);
        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| ConversationStoreError::IoError(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{BreakfastKind, BreakfastPreference, MorningDrink, SlotBag};
    use crate::domain::dialog::{BreakfastOptions, DialogFrame, FrameOptions};
    use tempfile::TempDir;

    fn test_id(s: &str) -> ConversationId {
        ConversationId::new(s).unwrap()
    }

    fn nested_record(id: &ConversationId) -> ConversationRecord {
        let mut record = ConversationRecord::new(id.clone());
        let mut root = DialogFrame::begin(FrameOptions::Booking(SlotBag {
            guests: Some(2),
            children: Some(1),
            breakfast: Some(BreakfastPreference::new(BreakfastKind::Vegan, MorningDrink::GreenTea)),
            allergies: Some("none".to_string()),
            ..SlotBag::default()
        }));
        root.step_index = 2;
        record.stack.push(root);
        record.stack.push(DialogFrame::begin(FrameOptions::Breakfast(BreakfastOptions {
            kind: Some(BreakfastKind::Buffet),
            drink: None,
        })));
        record
    }

    #[tokio::test]
    async fn test_file_store_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());
        let id = test_id("conv-1");
        let record = nested_record(&id);

        store.save_state(&id, &record).await.unwrap();
        let loaded = store.load_state(&id).await.unwrap();

        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_file_store_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());

        let result = store.load_state(&test_id("missing")).await;
        assert!(matches!(result, Err(ConversationStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_is_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());
        let id = test_id("conv-bad");

        std::fs::write(store.record_path(&id), "stack: [{dialog_id: flight}]").unwrap();

        let result = store.load_state(&id).await;
        assert!(matches!(result, Err(ConversationStoreError::DeserializationFailed(_))));
    }

    #[tokio::test]
    async fn test_file_store_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path());
        let id = test_id("conv-2");

        store.save_state(&id, &nested_record(&id)).await.unwrap();
        assert!(store.record_path(&id).exists());

        store.delete(&id).await.unwrap();
        assert!(!store.record_path(&id).exists());
        assert!(matches!(
            store.load_state(&id).await,
            Err(ConversationStoreError::NotFound(_))
        ));
        store.delete(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_creates_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileConversationStore::new(temp_dir.path().join("nested/dir"));
        let id = test_id("conv-3");

        store.save_state(&id, &nested_record(&id)).await.unwrap();
        assert!(store.load_state(&id).await.is_ok());
    }

    #[test]
    fn test_record_path_escapes_unsafe_characters() {
        let store = FileConversationStore::new("/data");
        let path = store.record_path(&test_id("webchat:a/b"));
        assert_eq!(path, PathBuf::from("/data/webchat%3Aa%2Fb.yaml"));
    }
}
