//! ConversationRecord - what is persisted between turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stack::DialogStack;
use super::status::ConversationStatus;
use super::turn::TurnOutcome;
use crate::domain::booking::SlotBag;
use crate::domain::foundation::{ConversationId, StateMachine, TurnId, ValidationError};

/// Stored state of one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub conversation_id: ConversationId,
    pub stack: DialogStack,
    pub status: ConversationStatus,
    /// Booking completed by the most recent booking flow, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_booking: Option<SlotBag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_turn_id: Option<TurnId>,
    pub turn_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationRecord {
    /// A fresh, idle conversation.
    pub fn new(conversation_id: ConversationId) -> Self {
        let now = Utc::now();
        Self {
            conversation_id,
            stack: DialogStack::new(),
            status: ConversationStatus::Idle,
            last_booking: None,
            last_turn_id: None,
            turn_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records a processed turn: new stack, status transition and bookkeeping.
    pub fn apply_turn(
        &mut self,
        turn_id: TurnId,
        stack: DialogStack,
        outcome: &TurnOutcome,
    ) -> Result<(), ValidationError> {
        if let Some(next) = outcome.status() {
            if next != self.status {
                self.status = self.status.transition_to(next)?;
            }
        }
        if let TurnOutcome::Completed(bag) = outcome {
            self.last_booking = Some(bag.clone());
        }
        self.stack = stack;
        self.last_turn_id = Some(turn_id);
        self.turn_count += 1;
        self.updated_at = Utc::now();
        Ok(())
    }
}
