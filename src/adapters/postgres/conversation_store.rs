//! PostgreSQL implementation of ConversationStore.
//!
//! Each conversation is one row; the dialog stack and slot bag are kept as
//! a serialized JSON document next to a few queryable columns.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::dialog::ConversationRecord;
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationStore, ConversationStoreError};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS conversation_records (
        conversation_id TEXT PRIMARY KEY,
        status          TEXT NOT NULL,
        stack_depth     INTEGER NOT NULL,
        record          TEXT NOT NULL,
        updated_at      TIMESTAMPTZ NOT NULL
    )
"#;

/// PostgreSQL implementation of ConversationStore.
#[derive(Clone)]
pub struct PostgresConversationStore {
    pool: PgPool,
}

impl PostgresConversationStore {
    /// Creates a new PostgresConversationStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the backing table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), ConversationStoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                ConversationStoreError::DatabaseError(format!("Failed to create table: {}", e))
            })?;
        Ok(())
    }
}

#[async_trait]
impl ConversationStore for PostgresConversationStore {
    async fn save_state(
        &self,
        id: &ConversationId,
        record: &ConversationRecord,
    ) -> Result<(), ConversationStoreError> {
        let document = encode_record(record)?;

        sqlx::query(
            r#"
            INSERT INTO conversation_records (
                conversation_id, status, stack_depth, record, updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (conversation_id) DO UPDATE SET
                status = EXCLUDED.status,
                stack_depth = EXCLUDED.stack_depth,
                record = EXCLUDED.record,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(id.as_str())
        .bind(record.status.to_string())
        .bind(record.stack.depth() as i32)
        .bind(document)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            ConversationStoreError::DatabaseError(format!("Failed to save conversation: {}", e))
        })?;

        Ok(())
    }

    async fn load_state(
        &self,
        id: &ConversationId,
    ) -> Result<ConversationRecord, ConversationStoreError> {
        let row = sqlx::query("SELECT record FROM conversation_records WHERE conversation_id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                ConversationStoreError::DatabaseError(format!(
                    "Failed to fetch conversation: {}",
                    e
                ))
            })?;

        let row = match row {
            Some(row) => row,
            None => return Err(ConversationStoreError::NotFound(id.clone())),
        };

        let document: String = row.try_get("record").map_err(|e| {
            ConversationStoreError::DatabaseError(format!("Failed to read record column: {}", e))
        })?;

        decode_record(&document)
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), ConversationStoreError> {
        sqlx::query("DELETE FROM conversation_records WHERE conversation_id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                ConversationStoreError::DatabaseError(format!(
                    "Failed to delete conversation: {}",
                    e
                ))
            })?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Document encoding
// ════════════════════════════════════════════════════════════════════════════════

fn encode_record(record: &ConversationRecord) -> Result<String, ConversationStoreError> {
    serde_json::to_string(record)
        .map_err(|e| ConversationStoreError::SerializationFailed(e.to_string()))
}

fn decode_record(document: &str) -> Result<ConversationRecord, ConversationStoreError> {
    serde_json::from_str(document)
        .map_err(|e| ConversationStoreError::DeserializationFailed(e.to_string()))
}
