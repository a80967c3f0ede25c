//! Conversation status tracked on the stored record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where a conversation stands after its last turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    /// No booking has been started yet.
    #[default]
    Idle,
    /// A booking is suspended awaiting the user's answer.
    Active,
    /// The last booking completed.
    Completed,
    /// The last booking was cancelled.
    Cancelled,
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConversationStatus::Idle => "idle",
            ConversationStatus::Active => "active",
            ConversationStatus::Completed => "completed",
            ConversationStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

impl StateMachine for ConversationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationStatus::*;
        matches!(
            (self, target),
            (Idle, Active)
                | (Idle, Completed)
                | (Idle, Cancelled)
                | (Active, Completed)
                | (Active, Cancelled)
                | (Completed, Active)
                | (Completed, Cancelled)
                | (Cancelled, Active)
                | (Cancelled, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationStatus::*;
        match self {
            Idle => vec![Active, Completed, Cancelled],
            Active => vec![Completed, Cancelled],
            Completed => vec![Active, Cancelled],
            Cancelled => vec![Active, Completed],
        }
    }
}
