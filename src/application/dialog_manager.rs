//! DialogManager - runs turns against stored conversations.
//!
//! One turn is: load the record, recognize the utterance once, run the turn
//! engine over the stack, save the record once. Turns of the same
//! conversation are serialized with a per-conversation async lock; turns of
//! different conversations share nothing and run concurrently.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::error::EngineError;
use crate::domain::booking::Recognition;
use crate::domain::dialog::{
    Activity, ConversationRecord, ConversationStatus, OutgoingMessage, TurnEngine, TurnOutcome,
};
use crate::domain::foundation::{ConversationId, TurnId};
use crate::ports::{ConversationStore, ConversationStoreError, Recognizer};

/// What one processed turn produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub turn_id: TurnId,
    pub messages: Vec<OutgoingMessage>,
    pub outcome: TurnOutcome,
    pub status: ConversationStatus,
}

/// Coordinates the recognizer, the turn engine and the conversation store.
pub struct DialogManager {
    engine: TurnEngine,
    recognizer: Arc<dyn Recognizer>,
    store: Arc<dyn ConversationStore>,
    locks: Mutex<HashMap<ConversationId, Arc<Mutex<()>>>>,
}

impl DialogManager {
    pub fn new(
        engine: TurnEngine,
        recognizer: Arc<dyn Recognizer>,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            engine,
            recognizer,
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Processes a user message.
    pub async fn process_message(
        &self,
        id: &ConversationId,
        text: impl Into<String>,
    ) -> Result<TurnReport, EngineError> {
        self.process_turn(id, Activity::message(text)).await
    }

    /// Processes a member joining the conversation.
    pub async fn join(&self, id: &ConversationId) -> Result<TurnReport, EngineError> {
        self.process_turn(id, Activity::ConversationUpdate).await
    }

    /// Processes one inbound activity.
    ///
    /// # Errors
    ///
    /// - `CorruptState` if the stored record cannot be resumed; the record
    ///   is reset to idle before returning
    /// - `Store` if loading or saving fails
    #[instrument(skip(self, id, activity), fields(conversation_id = %id))]
    pub async fn process_turn(
        &self,
        id: &ConversationId,
        activity: Activity,
    ) -> Result<TurnReport, EngineError> {
        let lock = self.lock_for(id).await;
        let result = {
            let _guard = lock.lock().await;
            self.run_turn(id, &activity).await
        };
        self.release(id, lock).await;
        result
    }

    /// Returns the stored record, if any.
    pub async fn snapshot(
        &self,
        id: &ConversationId,
    ) -> Result<Option<ConversationRecord>, EngineError> {
        match self.store.load_state(id).await {
            Ok(record) => Ok(Some(record)),
            Err(ConversationStoreError::NotFound(_)) => Ok(None),
            Err(ConversationStoreError::DeserializationFailed(reason)) => {
                Err(EngineError::CorruptState(reason))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Forgets a conversation entirely.
    pub async fn reset(&self, id: &ConversationId) -> Result<(), EngineError> {
        let lock = self.lock_for(id).await;
        let result = {
            let _guard = lock.lock().await;
            self.store.delete(id).await
        };
        self.release(id, lock).await;
        result?;
        info!(conversation_id = %id, "Conversation reset");
        Ok(())
    }

    async fn run_turn(
        &self,
        id: &ConversationId,
        activity: &Activity,
    ) -> Result<TurnReport, EngineError> {
        let mut record = match self.store.load_state(id).await {
            Ok(record) => record,
            Err(ConversationStoreError::NotFound(_)) => ConversationRecord::new(id.clone()),
            Err(ConversationStoreError::DeserializationFailed(reason)) => {
                return Err(self.reset_corrupt(id, reason).await);
            }
            Err(e) => return Err(e.into()),
        };

        let recognition = self.recognize(activity).await;
        let mut stack = record.stack.clone();

        let output = match self.engine.run(
            &mut stack,
            activity,
            &recognition,
            self.recognizer.is_configured(),
        ) {
            Ok(output) => output,
            Err(e) => return Err(self.reset_corrupt(id, e.to_string()).await),
        };

        let turn_id = TurnId::new();
        record.apply_turn(turn_id, stack, &output.outcome)?;
        self.store.save_state(id, &record).await?;

        info!(
            %turn_id,
            status = %record.status,
            depth = record.stack.depth(),
            messages = output.messages.len(),
            "Turn processed"
        );

        Ok(TurnReport {
            turn_id,
            messages: output.messages,
            outcome: output.outcome,
            status: record.status,
        })
    }

    /// Recognizes message text; any failure degrades to an empty recognition.
    async fn recognize(&self, activity: &Activity) -> Recognition {
        let Some(text) = activity.text() else {
            return Recognition::default();
        };
        if !self.recognizer.is_configured() {
            return Recognition::empty(text);
        }
        match self.recognizer.recognize(text).await {
            Ok(recognition) => recognition,
            Err(e) => {
                warn!(
                    recognizer = self.recognizer.name(),
                    error = %e,
                    "Recognizer failed, continuing without intents"
                );
                Recognition::empty(text)
            }
        }
    }

    /// Replaces an unusable record with a fresh idle one.
    async fn reset_corrupt(&self, id: &ConversationId, reason: String) -> EngineError {
        warn!(conversation_id = %id, %reason, "Corrupt conversation state, resetting to idle");
        match self.store.save_state(id, &ConversationRecord::new(id.clone())).await {
            Ok(()) => EngineError::CorruptState(reason),
            Err(e) => e.into(),
        }
    }

    async fn lock_for(&self, id: &ConversationId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id.clone()).or_default().clone()
    }

    /// Drops the conversation's lock entry once nobody else holds it.
    async fn release(&self, id: &ConversationId, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        // The map and `lock` account for two references.
        if Arc::strong_count(&lock) <= 2 {
            locks.remove(id);
        }
    }
}
