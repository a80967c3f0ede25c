//! Dialog module - stack-based dialog orchestration.
//!
//! A conversation is a stack of dialog frames. Each turn the top frame is
//! resumed with the user's message; dialogs may push children, whose results
//! flow back to the step that began them. The stack is the only state that
//! survives between turns.
//!
//! # Key Types
//!
//! - [`DialogStack`] / [`DialogFrame`] - persisted suspended state
//! - [`Dialog`] - waterfall of steps, run by [`resume`]
//! - [`InterruptionFilter`] - help and cancel at any depth
//! - [`TurnEngine`] - one activity against one stack
//! - [`ConversationRecord`] - stack plus status, as stored

mod activity;
pub mod dialogs;
mod errors;
mod frame;
mod interruption;
mod message;
mod record;
mod registry;
mod stack;
mod status;
mod step;
mod turn;
mod waterfall;

pub use activity::Activity;
pub use errors::DialogError;
pub use frame::{BreakfastOptions, DateResolverOptions, DialogFrame, DialogId, FrameOptions};
pub use interruption::{Interruption, InterruptionFilter};
pub use message::{InputHint, OutgoingMessage};
pub use record::ConversationRecord;
pub use registry::DialogRegistry;
pub use stack::DialogStack;
pub use status::ConversationStatus;
pub use step::{DialogResult, StepContext, StepInput, StepOutcome, StepValue, UserAnswer};
pub use turn::{TurnEngine, TurnOutcome, TurnOutput, DEFAULT_CASCADE_LIMIT};
pub use waterfall::{resume, Dialog, ResumeOutcome};
