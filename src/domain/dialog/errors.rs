//! Errors raised while running dialogs.

use thiserror::Error;

use super::frame::DialogId;

/// A stack that cannot be executed. Every variant points at corrupt or
/// inconsistent persisted state rather than at bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogError {
    #[error("Dialog '{0}' is not registered")]
    UnknownDialog(DialogId),

    #[error("Frame of dialog '{dialog}' carries options for '{found}'")]
    OptionsMismatch { dialog: DialogId, found: DialogId },

    #[error("Step {index} is out of range for dialog '{dialog}' with {count} steps")]
    StepOutOfRange {
        dialog: DialogId,
        index: usize,
        count: usize,
    },

    #[error("Step {index} of dialog '{dialog}' cannot handle input '{input}'")]
    UnexpectedInput {
        dialog: DialogId,
        index: usize,
        input: &'static str,
    },

    #[error("No dialog is active")]
    EmptyStack,

    #[error("Root dialog '{0}' ended with a result that is not a booking outcome")]
    UnexpectedRootResult(DialogId),

    #[error("Turn exceeded {0} dialog transitions")]
    CascadeLimit(usize),
}
