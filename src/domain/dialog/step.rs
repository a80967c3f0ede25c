//! Step inputs and outcomes exchanged between the runner and dialogs.

use serde::{Deserialize, Serialize};

use super::frame::FrameOptions;
use super::message::OutgoingMessage;
use crate::domain::booking::{BreakfastPreference, PaymentMethod, PillowType, Recognition, SlotBag};

/// Value a step hands to the next step of the same dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum StepValue {
    Count(u32),
    Flag(bool),
    Text(String),
    Date(String),
    Breakfast(BreakfastPreference),
    Payment(PaymentMethod),
    Pillow(PillowType),
    Done,
}

/// What a completed dialog hands back to its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DialogResult {
    Booking(SlotBag),
    Breakfast(BreakfastPreference),
    Date(String),
    DateUnresolved,
    Cancelled,
}

/// The user's message as seen by the step that prompted for it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAnswer {
    pub text: String,
    pub recognition: Recognition,
}

impl UserAnswer {
    pub fn new(text: impl Into<String>, recognition: Recognition) -> Self {
        Self {
            text: text.into(),
            recognition,
        }
    }
}

/// Why a step is being run.
#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    /// First step of a freshly pushed frame.
    Begin,
    /// The previous step of the same dialog moved forward with this value.
    Advanced(StepValue),
    /// Answer to the prompt this step issued last turn.
    AnswerFromUser(UserAnswer),
    /// A child this step began has completed.
    ResultFromChild(DialogResult),
}

impl StepInput {
    pub fn kind(&self) -> &'static str {
        match self {
            StepInput::Begin => "begin",
            StepInput::Advanced(_) => "advanced",
            StepInput::AnswerFromUser(_) => "answer_from_user",
            StepInput::ResultFromChild(_) => "result_from_child",
        }
    }
}

/// What a step decided.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Move to the next step synchronously.
    Next(StepValue),
    /// Send the message and suspend until the next user message.
    Prompt(OutgoingMessage),
    /// Push a child dialog; this step is re-entered with its result.
    BeginChild(FrameOptions),
    /// Restart this dialog from its first step with new options.
    Restart(FrameOptions),
    /// The dialog is finished.
    End(DialogResult),
}

/// Per-run context handed to each step.
pub struct StepContext<'a> {
    outbox: &'a mut Vec<OutgoingMessage>,
}

impl<'a> StepContext<'a> {
    pub fn new(outbox: &'a mut Vec<OutgoingMessage>) -> Self {
        Self { outbox }
    }

    /// Queues a message without suspending.
    pub fn send(&mut self, message: OutgoingMessage) {
        self.outbox.push(message);
    }
}
