//! Date resolver sub-dialog: asks until the arrival names one calendar day.
//!
//! An ambiguous answer restarts the dialog with the answer as the new seed
//! and one more attempt counted. With a cap configured, the dialog gives up
//! with `DateUnresolved` once the cap is reached.

use crate::domain::booking::{prompts, AmbiguityResolver, EntityCategory};
use crate::domain::dialog::errors::DialogError;
use crate::domain::dialog::frame::{DateResolverOptions, DialogId, FrameOptions};
use crate::domain::dialog::message::OutgoingMessage;
use crate::domain::dialog::step::{DialogResult, StepContext, StepInput, StepOutcome, StepValue};
use crate::domain::dialog::waterfall::Dialog;

const STEPS: &[&str] = &["ask", "finish"];

#[derive(Debug, Clone)]
pub struct DateResolverDialog {
    max_attempts: Option<u32>,
}

impl DateResolverDialog {
    /// `max_attempts = None` keeps asking forever.
    pub fn new(max_attempts: Option<u32>) -> Self {
        Self { max_attempts }
    }

    fn ask(
        &self,
        options: &DateResolverOptions,
        input: StepInput,
    ) -> Result<StepOutcome, DialogError> {
        match input {
            StepInput::Begin | StepInput::Advanced(_) => {
                let seed = options.seed.as_deref();
                if let Some(date) = seed.and_then(AmbiguityResolver::normalize) {
                    return Ok(StepOutcome::Next(StepValue::Date(date)));
                }
                // A recognizer TIMEX means nothing to the guest.
                let text = match seed.filter(|s| !AmbiguityResolver::is_timex_shaped(s)) {
                    Some(seed) => prompts::retry_arrival(seed),
                    None => prompts::ASK_ARRIVAL.to_string(),
                };
                Ok(StepOutcome::Prompt(OutgoingMessage::prompt(text)))
            }
            StepInput::AnswerFromUser(answer) => {
                let expr = answer
                    .recognition
                    .first_entity(EntityCategory::DateTime)
                    .or_else(|| answer.recognition.first_entity(EntityCategory::ArrivalDate))
                    .filter(|e| AmbiguityResolver::is_definite(e))
                    .unwrap_or(answer.text.as_str())
                    .trim()
                    .to_string();

                if let Some(date) = AmbiguityResolver::normalize(&expr) {
                    return Ok(StepOutcome::Next(StepValue::Date(date)));
                }

                let attempts = options.attempts.saturating_add(1);
                if self.max_attempts.is_some_and(|max| attempts >= max) {
                    return Ok(StepOutcome::End(DialogResult::DateUnresolved));
                }
                Ok(StepOutcome::Restart(FrameOptions::DateResolver(DateResolverOptions {
                    seed: Some(expr),
                    attempts,
                })))
            }
            other => Err(unexpected(0, &other)),
        }
    }

    fn finish(input: StepInput) -> Result<StepOutcome, DialogError> {
        match input {
            StepInput::Advanced(StepValue::Date(date)) => {
                Ok(StepOutcome::End(DialogResult::Date(date)))
            }
            other => Err(unexpected(1, &other)),
        }
    }
}

fn unexpected(index: usize, input: &StepInput) -> DialogError {
    DialogError::UnexpectedInput {
        dialog: DialogId::DateResolver,
        index,
        input: input.kind(),
    }
}

impl Dialog for DateResolverDialog {
    fn id(&self) -> DialogId {
        DialogId::DateResolver
    }

    fn steps(&self) -> &'static [&'static str] {
        STEPS
    }

    fn run_step(
        &self,
        index: usize,
        options: &mut FrameOptions,
        input: StepInput,
        _ctx: &mut StepContext<'_>,
    ) -> Result<StepOutcome, DialogError> {
        let found = options.dialog_id();
        let FrameOptions::DateResolver(options) = options else {
            return Err(DialogError::OptionsMismatch {
                dialog: self.id(),
                found,
            });
        };

        match index {
            0 => self.ask(options, input),
            1 => Self::finish(input),
            _ => Err(DialogError::StepOutOfRange {
                dialog: self.id(),
                index,
                count: STEPS.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::Recognition;
    use crate::domain::dialog::frame::DialogFrame;
    use crate::domain::dialog::step::UserAnswer;
    use crate::domain::dialog::waterfall::{resume, ResumeOutcome};

    fn answer(text: &str) -> StepInput {
        StepInput::AnswerFromUser(UserAnswer::new(text, Recognition::empty(text)))
    }

    fn run(
        dialog: &DateResolverDialog,
        frame: &mut DialogFrame,
        input: StepInput,
    ) -> (ResumeOutcome, Vec<OutgoingMessage>) {
        let mut outbox = Vec::new();
        let outcome = resume(dialog, frame, input, &mut StepContext::new(&mut outbox)).unwrap();
        (outcome, outbox)
    }

    fn frame(seed: Option<&str>, attempts: u32) -> DialogFrame {
        DialogFrame::begin(FrameOptions::DateResolver(DateResolverOptions {
            seed: seed.map(str::to_string),
            attempts,
        }))
    }

    #[test]
    fn definite_seed_completes_without_prompt() {
        let dialog = DateResolverDialog::new(Some(5));
        let (outcome, outbox) = run(&dialog, &mut frame(Some("14.06.2025"), 0), StepInput::Begin);

        assert_eq!(outcome, ResumeOutcome::Completed(DialogResult::Date("2025-06-14".into())));
        assert!(outbox.is_empty());
    }

    #[test]
    fn missing_seed_asks_for_arrival() {
        let dialog = DateResolverDialog::new(Some(5));
        let (_, outbox) = run(&dialog, &mut frame(None, 0), StepInput::Begin);
        assert_eq!(outbox[0].text, prompts::ASK_ARRIVAL);
    }

    #[test]
    fn timex_seed_asks_plainly_instead_of_echoing_it() {
        let dialog = DateResolverDialog::new(Some(5));
        let (outcome, outbox) = run(&dialog, &mut frame(Some("XXXX-WXX-2"), 0), StepInput::Begin);

        assert_eq!(outcome, ResumeOutcome::Suspended);
        assert_eq!(outbox[0].text, prompts::ASK_ARRIVAL);
        assert!(!outbox[0].text.contains("XXXX"));
    }

    #[test]
    fn ambiguous_answer_restarts_with_counted_attempt() {
        let dialog = DateResolverDialog::new(Some(5));
        let (outcome, _) = run(&dialog, &mut frame(None, 0), answer("Tuesday"));

        assert_eq!(outcome, ResumeOutcome::Replaced(frame(Some("Tuesday"), 1)));
    }

    #[test]
    fn restarted_frame_reprompts_with_previous_answer() {
        let dialog = DateResolverDialog::new(Some(5));
        let (_, outbox) = run(&dialog, &mut frame(Some("Tuesday"), 1), StepInput::Begin);
        assert_eq!(outbox[0].text, prompts::retry_arrival("Tuesday"));
    }

    #[test]
    fn reaching_the_cap_gives_up() {
        let dialog = DateResolverDialog::new(Some(2));
        let (outcome, _) = run(&dialog, &mut frame(Some("soon"), 1), answer("later"));
        assert_eq!(outcome, ResumeOutcome::Completed(DialogResult::DateUnresolved));
    }

    #[test]
    fn unbounded_resolver_keeps_asking() {
        let dialog = DateResolverDialog::new(None);
        let (outcome, _) = run(&dialog, &mut frame(Some("soon"), 500), answer("later"));
        assert_eq!(outcome, ResumeOutcome::Replaced(frame(Some("later"), 501)));
    }

    #[test]
    fn definite_datetime_entity_wins_over_text() {
        let recognition = Recognition::empty("the 14th")
            .with_entity(EntityCategory::DateTime, "2025-06-14");
        let input = StepInput::AnswerFromUser(UserAnswer::new("the 14th", recognition));
        let (outcome, _) = run(&DateResolverDialog::new(Some(5)), &mut frame(None, 0), input);

        assert_eq!(outcome, ResumeOutcome::Completed(DialogResult::Date("2025-06-14".into())));
    }
}
