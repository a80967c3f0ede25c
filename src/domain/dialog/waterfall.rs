//! Waterfall dialogs and the runner that advances one frame.

use tracing::debug;

use super::errors::DialogError;
use super::frame::{DialogFrame, DialogId, FrameOptions};
use super::step::{DialogResult, StepContext, StepInput, StepOutcome};

/// An ordered sequence of steps.
///
/// Steps are pure functions of the frame options and the input: running the
/// same step twice against the same options yields the same outcome.
pub trait Dialog: Send + Sync {
    fn id(&self) -> DialogId;

    /// Step names in order; the length is the step count.
    fn steps(&self) -> &'static [&'static str];

    fn run_step(
        &self,
        index: usize,
        options: &mut FrameOptions,
        input: StepInput,
        ctx: &mut StepContext<'_>,
    ) -> Result<StepOutcome, DialogError>;
}

/// How a frame was left after being resumed.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeOutcome {
    /// A step prompted and the frame waits for the next message.
    Suspended,
    /// A step began a child; the frame stays on that step.
    PushedChild(DialogFrame),
    /// The dialog restarted itself with new options.
    Replaced(DialogFrame),
    Completed(DialogResult),
}

/// Runs steps of `frame` starting at its current step until one of them
/// prompts, begins a child, restarts or ends the dialog.
pub fn resume(
    dialog: &dyn Dialog,
    frame: &mut DialogFrame,
    input: StepInput,
    ctx: &mut StepContext<'_>,
) -> Result<ResumeOutcome, DialogError> {
    if frame.dialog_id != dialog.id() {
        return Err(DialogError::UnknownDialog(frame.dialog_id));
    }
    let found = frame.options.dialog_id();
    if found != dialog.id() {
        return Err(DialogError::OptionsMismatch {
            dialog: dialog.id(),
            found,
        });
    }

    let steps = dialog.steps();
    let mut input = input;
    loop {
        let index = frame.step_index;
        let Some(step) = steps.get(index) else {
            return Err(DialogError::StepOutOfRange {
                dialog: dialog.id(),
                index,
                count: steps.len(),
            });
        };

        let input_kind = input.kind();
        let outcome = dialog.run_step(index, &mut frame.options, input, ctx)?;
        debug!(
            dialog = %dialog.id(),
            step = *step,
            input = input_kind,
            outcome = outcome_name(&outcome),
            "Step ran"
        );

        match outcome {
            StepOutcome::Next(value) => {
                frame.step_index += 1;
                input = StepInput::Advanced(value);
            }
            StepOutcome::Prompt(message) => {
                ctx.send(message);
                return Ok(ResumeOutcome::Suspended);
            }
            StepOutcome::BeginChild(options) => {
                return Ok(ResumeOutcome::PushedChild(DialogFrame::begin(options)));
            }
            StepOutcome::Restart(options) => {
                let found = options.dialog_id();
                if found != dialog.id() {
                    return Err(DialogError::OptionsMismatch {
                        dialog: dialog.id(),
                        found,
                    });
                }
                return Ok(ResumeOutcome::Replaced(DialogFrame::begin(options)));
            }
            StepOutcome::End(result) => return Ok(ResumeOutcome::Completed(result)),
        }
    }
}

fn outcome_name(outcome: &StepOutcome) -> &'static str {
    match outcome {
        StepOutcome::Next(_) => "next",
        StepOutcome::Prompt(_) => "prompt",
        StepOutcome::BeginChild(_) => "begin_child",
        StepOutcome::Restart(_) => "restart",
        StepOutcome::End(_) => "end",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::Recognition;
    use crate::domain::dialog::frame::{BreakfastOptions, DateResolverOptions};
    use crate::domain::dialog::message::OutgoingMessage;
    use crate::domain::dialog::step::{StepValue, UserAnswer};

    /// Two-step dialog: asks once, then ends with the answer as a date.
    struct Echo;

    impl Dialog for Echo {
        fn id(&self) -> DialogId {
            DialogId::DateResolver
        }

        fn steps(&self) -> &'static [&'static str] {
            &["ask", "finish"]
        }

        fn run_step(
            &self,
            index: usize,
            _options: &mut FrameOptions,
            input: StepInput,
            _ctx: &mut StepContext<'_>,
        ) -> Result<StepOutcome, DialogError> {
            match (index, input) {
                (0, StepInput::Begin) => Ok(StepOutcome::Prompt(OutgoingMessage::prompt("?"))),
                (0, StepInput::AnswerFromUser(a)) => Ok(StepOutcome::Next(StepValue::Text(a.text))),
                (1, StepInput::Advanced(StepValue::Text(t))) => {
                    Ok(StepOutcome::End(DialogResult::Date(t)))
                }
                (index, input) => Err(DialogError::UnexpectedInput {
                    dialog: self.id(),
                    index,
                    input: input.kind(),
                }),
            }
        }
    }

    fn frame() -> DialogFrame {
        DialogFrame::begin(FrameOptions::DateResolver(DateResolverOptions::default()))
    }

    #[test]
    fn prompt_suspends_and_queues_message() {
        let mut outbox = Vec::new();
        let mut frame = frame();

        let mut ctx = StepContext::new(&mut outbox);
        let outcome = resume(&Echo, &mut frame, StepInput::Begin, &mut ctx).unwrap();

        assert_eq!(outcome, ResumeOutcome::Suspended);
        assert_eq!(frame.step_index, 0);
        assert_eq!(outbox, vec![OutgoingMessage::prompt("?")]);
    }

    #[test]
    fn next_advances_until_end() {
        let mut outbox = Vec::new();
        let mut frame = frame();
        let answer =
            StepInput::AnswerFromUser(UserAnswer::new("2025-06-14", Recognition::default()));

        let outcome =
            resume(&Echo, &mut frame, answer, &mut StepContext::new(&mut outbox)).unwrap();

        assert_eq!(outcome, ResumeOutcome::Completed(DialogResult::Date("2025-06-14".into())));
        assert_eq!(frame.step_index, 1);
    }

    #[test]
    fn out_of_range_step_is_an_error() {
        let mut outbox = Vec::new();
        let mut frame = frame();
        frame.step_index = 7;

        let err = resume(&Echo, &mut frame, StepInput::Begin, &mut StepContext::new(&mut outbox))
            .unwrap_err();
        assert!(matches!(err, DialogError::StepOutOfRange { index: 7, count: 2, .. }));
    }

    #[test]
    fn mismatched_options_are_an_error() {
        let mut outbox = Vec::new();
        let mut frame = frame();
        frame.options = FrameOptions::Breakfast(BreakfastOptions::default());

        let err = resume(&Echo, &mut frame, StepInput::Begin, &mut StepContext::new(&mut outbox))
            .unwrap_err();
        assert_eq!(
            err,
            DialogError::OptionsMismatch {
                dialog: DialogId::DateResolver,
                found: DialogId::Breakfast
            }
        );
    }
}
