//! Data Transfer Objects for conversation HTTP endpoints.
//!
//! These types define the JSON request/response format for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::TurnReport;
use crate::domain::booking::{Intent, SlotBag};
use crate::domain::dialog::{
    ConversationRecord, ConversationStatus, DialogId, OutgoingMessage, TurnOutcome,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to send a user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnOutcomeResponse {
    Welcomed,
    Answered { intent: Intent },
    Suspended { dialog: DialogId, step: usize },
    HelpShown,
    Completed { booking: SlotBag },
    Cancelled,
}

impl From<TurnOutcome> for TurnOutcomeResponse {
    fn from(outcome: TurnOutcome) -> Self {
        match outcome {
            TurnOutcome::Welcomed => Self::Welcomed,
            TurnOutcome::Answered(intent) => Self::Answered { intent },
            TurnOutcome::Suspended { dialog, step } => Self::Suspended { dialog, step },
            TurnOutcome::HelpShown => Self::HelpShown,
            TurnOutcome::Completed(booking) => Self::Completed { booking },
            TurnOutcome::Cancelled => Self::Cancelled,
        }
    }
}

/// Response to a processed turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub turn_id: String,
    pub status: ConversationStatus,
    pub outcome: TurnOutcomeResponse,
    pub messages: Vec<OutgoingMessage>,
}

impl From<TurnReport> for TurnResponse {
    fn from(report: TurnReport) -> Self {
        Self {
            turn_id: report.turn_id.to_string(),
            status: report.status,
            outcome: report.outcome.into(),
            messages: report.messages,
        }
    }
}

/// One frame of the dialog stack, bottom first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameView {
    pub dialog_id: DialogId,
    pub step_index: usize,
}

/// Stored state of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub conversation_id: String,
    pub status: ConversationStatus,
    pub frames: Vec<FrameView>,
    /// Slots of the booking in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<SlotBag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_booking: Option<SlotBag>,
    pub turn_count: u64,
    pub updated_at: DateTime<Utc>,
}

impl From<ConversationRecord> for ConversationResponse {
    fn from(record: ConversationRecord) -> Self {
        Self {
            conversation_id: record.conversation_id.to_string(),
            status: record.status,
            frames: record
                .stack
                .frames()
                .iter()
                .map(|frame| FrameView {
                    dialog_id: frame.dialog_id,
                    step_index: frame.step_index,
                })
                .collect(),
            slots: record.stack.slot_bag().cloned(),
            last_booking: record.last_booking,
            turn_count: record.turn_count,
            updated_at: record.updated_at,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialog::{DialogFrame, FrameOptions};
    use crate::domain::foundation::ConversationId;

    #[test]
    fn send_message_request_deserializes() {
        let request: SendMessageRequest = serde_json::from_str(r#"{"text": "two"}"#).unwrap();
        assert_eq!(request.text, "two");
    }

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let outcome = TurnOutcomeResponse::from(TurnOutcome::Suspended {
            dialog: DialogId::DateResolver,
            step: 0,
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "suspended");
        assert_eq!(json["dialog"], "date_resolver");
        assert_eq!(json["step"], 0);
    }

    #[test]
    fn conversation_response_lists_frames_and_slots() {
        let mut record = ConversationRecord::new(ConversationId::new("c1").unwrap());
        let mut root = DialogFrame::begin(FrameOptions::Booking(SlotBag {
            guests: Some(2),
            ..SlotBag::default()
        }));
        root.step_index = 1;
        record.stack.push(root);

        let response = ConversationResponse::from(record);

        assert_eq!(response.frames.len(), 1);
        assert_eq!(response.frames[0].dialog_id, DialogId::Booking);
        assert_eq!(response.frames[0].step_index, 1);
        assert_eq!(response.slots.unwrap().guests, Some(2));
    }

    #[test]
    fn error_response_serializes_correctly() {
        let response = ErrorResponse::new("CORRUPT_STATE", "reset");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"error_code\":\"CORRUPT_STATE\""));
    }
}
