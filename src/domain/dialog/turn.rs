//! Turn engine: one inbound activity against one dialog stack.
//!
//! The engine is synchronous and pure apart from mutating the stack it is
//! given. Loading, recognition and persistence are the caller's business.

use tracing::debug;

use super::activity::Activity;
use super::errors::DialogError;
use super::frame::{DialogFrame, DialogId, FrameOptions};
use super::interruption::{Interruption, InterruptionFilter};
use super::message::OutgoingMessage;
use super::registry::DialogRegistry;
use super::stack::DialogStack;
use super::status::ConversationStatus;
use super::step::{DialogResult, StepContext, StepInput, UserAnswer};
use super::waterfall::{resume, ResumeOutcome};
use crate::domain::booking::{prompts, Intent, Recognition, SlotBag};

/// Default bound on frame transitions within one turn.
pub const DEFAULT_CASCADE_LIMIT: usize = 64;

/// How the turn ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// A member joined and was greeted.
    Welcomed,
    /// An idle question was answered without starting a booking.
    Answered(Intent),
    /// The top frame waits for the user's answer.
    Suspended { dialog: DialogId, step: usize },
    /// Help was shown; the stack is unchanged.
    HelpShown,
    Completed(SlotBag),
    Cancelled,
}

impl TurnOutcome {
    /// Status the conversation moves to, or `None` to keep the current one.
    pub fn status(&self) -> Option<ConversationStatus> {
        match self {
            TurnOutcome::Welcomed | TurnOutcome::Answered(_) | TurnOutcome::HelpShown => None,
            TurnOutcome::Suspended { .. } => Some(ConversationStatus::Active),
            TurnOutcome::Completed(_) => Some(ConversationStatus::Completed),
            TurnOutcome::Cancelled => Some(ConversationStatus::Cancelled),
        }
    }
}

/// Messages and outcome of one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutput {
    pub messages: Vec<OutgoingMessage>,
    pub outcome: TurnOutcome,
}

/// Drives the dialog stack through a turn.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    registry: DialogRegistry,
    filter: InterruptionFilter,
    cascade_limit: usize,
}

impl TurnEngine {
    pub fn new(registry: DialogRegistry, filter: InterruptionFilter, cascade_limit: usize) -> Self {
        Self {
            registry,
            filter,
            cascade_limit: cascade_limit.max(1),
        }
    }

    /// Engine running the hotel dialogs with default copy.
    pub fn hotel(max_date_attempts: Option<u32>) -> Self {
        Self::new(
            DialogRegistry::hotel(max_date_attempts),
            InterruptionFilter::default(),
            DEFAULT_CASCADE_LIMIT,
        )
    }

    /// Processes one activity.
    ///
    /// On error the stack is left in an unspecified state and should be
    /// discarded by the caller.
    pub fn run(
        &self,
        stack: &mut DialogStack,
        activity: &Activity,
        recognition: &Recognition,
        recognizer_configured: bool,
    ) -> Result<TurnOutput, DialogError> {
        let mut messages = Vec::new();

        let Some(text) = activity.text() else {
            messages.push(OutgoingMessage::text(prompts::WELCOME));
            messages.push(OutgoingMessage::prompt(prompts::GREETING));
            return Ok(TurnOutput {
                messages,
                outcome: TurnOutcome::Welcomed,
            });
        };

        let input = if stack.is_empty() {
            let intent = recognition.top_intent().0;
            let answer = match intent {
                Intent::Help => Some(OutgoingMessage::accepting(prompts::GENERAL_HELP)),
                Intent::HotelQuestion => Some(OutgoingMessage::accepting(prompts::HOTEL_FAQ)),
                Intent::Cancel => Some(OutgoingMessage::text(prompts::NOTHING_TO_CANCEL)),
                _ => None,
            };
            if let Some(answer) = answer {
                messages.push(answer);
                return Ok(TurnOutput {
                    messages,
                    outcome: TurnOutcome::Answered(intent),
                });
            }

            if !recognizer_configured {
                messages.push(OutgoingMessage::text(prompts::UNCONFIGURED_NOTICE));
            }
            let bag = SlotBag::seeded_from(recognition);
            debug!(?bag, "Starting booking");
            stack.push(DialogFrame::begin(FrameOptions::Booking(bag)));
            StepInput::Begin
        } else {
            match self.filter.check(stack, activity, recognition, &mut messages) {
                Interruption::HelpHandled => {
                    return Ok(TurnOutput {
                        messages,
                        outcome: TurnOutcome::HelpShown,
                    })
                }
                Interruption::CancelHandled => {
                    return Ok(TurnOutput {
                        messages,
                        outcome: TurnOutcome::Cancelled,
                    })
                }
                Interruption::None => {
                    StepInput::AnswerFromUser(UserAnswer::new(text, recognition.clone()))
                }
            }
        };

        let outcome = self.cascade(stack, input, &mut messages)?;
        Ok(TurnOutput { messages, outcome })
    }

    /// Resumes the top frame and settles pushes, restarts and pops until a
    /// step suspends or the root finishes.
    fn cascade(
        &self,
        stack: &mut DialogStack,
        input: StepInput,
        messages: &mut Vec<OutgoingMessage>,
    ) -> Result<TurnOutcome, DialogError> {
        let mut input = input;
        for _ in 0..self.cascade_limit {
            let Some(frame) = stack.top_mut() else {
                return Err(DialogError::EmptyStack);
            };
            let dialog = self.registry.get(frame.dialog_id)?;
            let mut ctx = StepContext::new(messages);

            match resume(dialog, frame, input, &mut ctx)? {
                ResumeOutcome::Suspended => {
                    return Ok(TurnOutcome::Suspended {
                        dialog: frame.dialog_id,
                        step: frame.step_index,
                    });
                }
                ResumeOutcome::PushedChild(child) => {
                    debug!(
                        parent = %frame.dialog_id,
                        child = %child.dialog_id,
                        "Beginning child dialog"
                    );
                    stack.push(child);
                    input = StepInput::Begin;
                }
                ResumeOutcome::Replaced(fresh) => {
                    debug!(dialog = %fresh.dialog_id, "Restarting dialog");
                    stack.replace_top(fresh);
                    input = StepInput::Begin;
                }
                ResumeOutcome::Completed(result) => {
                    let finished = frame.dialog_id;
                    stack.pop();
                    debug!(dialog = %finished, depth = stack.depth(), "Dialog completed");
                    if stack.is_empty() {
                        return match result {
                            DialogResult::Booking(bag) => Ok(TurnOutcome::Completed(bag)),
                            DialogResult::Cancelled => Ok(TurnOutcome::Cancelled),
                            _ => Err(DialogError::UnexpectedRootResult(finished)),
                        };
                    }
                    input = StepInput::ResultFromChild(result);
                }
            }
        }
        Err(DialogError::CascadeLimit(self.cascade_limit))
    }
}
