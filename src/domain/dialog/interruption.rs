//! Help and cancel requests, honoured at any nesting depth.

use tracing::debug;

use super::activity::Activity;
use super::message::OutgoingMessage;
use super::stack::DialogStack;
use crate::domain::booking::{prompts, Intent, Recognition};

/// Result of checking one message for an interruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    None,
    HelpHandled,
    CancelHandled,
}

/// Runs before every continue of a non-empty stack.
///
/// Help answers with the help text and leaves every frame where it was, so
/// the next message still answers the pending question. Cancel answers with
/// an acknowledgement and clears the whole stack.
#[derive(Debug, Clone)]
pub struct InterruptionFilter {
    help_text: String,
    cancel_text: String,
}

impl Default for InterruptionFilter {
    fn default() -> Self {
        Self::new(prompts::BOOKING_HELP, prompts::CANCELLED)
    }
}

impl InterruptionFilter {
    pub fn new(help_text: impl Into<String>, cancel_text: impl Into<String>) -> Self {
        Self {
            help_text: help_text.into(),
            cancel_text: cancel_text.into(),
        }
    }

    pub fn check(
        &self,
        stack: &mut DialogStack,
        activity: &Activity,
        recognition: &Recognition,
        outbox: &mut Vec<OutgoingMessage>,
    ) -> Interruption {
        if !activity.is_message() || stack.is_empty() {
            return Interruption::None;
        }

        match recognition.top_intent().0 {
            Intent::Help => {
                debug!(depth = stack.depth(), "Help requested");
                outbox.push(OutgoingMessage::accepting(self.help_text.clone()));
                Interruption::HelpHandled
            }
            Intent::Cancel => {
                debug!(depth = stack.depth(), "Cancel requested");
                outbox.push(OutgoingMessage::text(self.cancel_text.clone()));
                stack.clear();
                Interruption::CancelHandled
            }
            _ => Interruption::None,
        }
    }
}
