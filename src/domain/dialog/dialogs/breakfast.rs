//! Breakfast sub-dialog: kind, then drink.

use crate::domain::booking::{
    prompts, BreakfastKind, BreakfastPreference, ChoiceResolver, Choosable, MorningDrink,
};
use crate::domain::dialog::errors::DialogError;
use crate::domain::dialog::frame::{BreakfastOptions, DialogId, FrameOptions};
use crate::domain::dialog::message::OutgoingMessage;
use crate::domain::dialog::step::{DialogResult, StepContext, StepInput, StepOutcome, StepValue};
use crate::domain::dialog::waterfall::Dialog;

const STEPS: &[&str] = &["kind", "drink", "finish"];

#[derive(Debug, Default)]
pub struct BreakfastDialog;

impl BreakfastDialog {
    pub fn new() -> Self {
        Self
    }

    fn kind(options: &mut BreakfastOptions, input: StepInput) -> Result<StepOutcome, DialogError> {
        Ok(match input {
            StepInput::AnswerFromUser(answer) => {
                match ChoiceResolver::resolve::<BreakfastKind>(&answer.text) {
                    Some(kind) => {
                        options.kind = Some(kind);
                        StepOutcome::Next(StepValue::Done)
                    }
                    None => StepOutcome::Prompt(OutgoingMessage::choice(
                        prompts::RETRY_BREAKFAST_KIND,
                        BreakfastKind::choice_set(),
                    )),
                }
            }
            StepInput::Begin | StepInput::Advanced(_) => match options.kind {
                Some(_) => StepOutcome::Next(StepValue::Done),
                None => StepOutcome::Prompt(OutgoingMessage::choice(
                    prompts::ASK_BREAKFAST_KIND,
                    BreakfastKind::choice_set(),
                )),
            },
            other => return Err(unexpected(0, &other)),
        })
    }

    fn drink(options: &mut BreakfastOptions, input: StepInput) -> Result<StepOutcome, DialogError> {
        let moot = matches!(options.kind, None | Some(BreakfastKind::None));
        Ok(match input {
            StepInput::AnswerFromUser(answer) => {
                match ChoiceResolver::resolve::<MorningDrink>(&answer.text) {
                    Some(drink) => {
                        options.drink = Some(drink);
                        StepOutcome::Next(StepValue::Done)
                    }
                    None => StepOutcome::Prompt(OutgoingMessage::choice(
                        prompts::RETRY_DRINK,
                        MorningDrink::choice_set(),
                    )),
                }
            }
            StepInput::Begin | StepInput::Advanced(_) => {
                if moot || options.drink.is_some() {
                    StepOutcome::Next(StepValue::Done)
                } else {
                    StepOutcome::Prompt(OutgoingMessage::choice(
                        prompts::ASK_DRINK,
                        MorningDrink::choice_set(),
                    ))
                }
            }
            other => return Err(unexpected(1, &other)),
        })
    }

    fn finish(options: &BreakfastOptions, input: StepInput) -> Result<StepOutcome, DialogError> {
        match input {
            StepInput::Begin | StepInput::Advanced(_) => {
                let pref = BreakfastPreference::new(
                    options.kind.unwrap_or(BreakfastKind::NotDecided),
                    options.drink.unwrap_or(MorningDrink::Unset),
                );
                Ok(StepOutcome::End(DialogResult::Breakfast(pref)))
            }
            other => Err(unexpected(2, &other)),
        }
    }
}

fn unexpected(index: usize, input: &StepInput) -> DialogError {
    DialogError::UnexpectedInput {
        dialog: DialogId::Breakfast,
        index,
        input: input.kind(),
    }
}

impl Dialog for BreakfastDialog {
    fn id(&self) -> DialogId {
        DialogId::Breakfast
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
        let FrameOptions::Breakfast(options) = options else {
            return Err(DialogError::OptionsMismatch {
                dialog: self.id(),
                found,
            });
        };

        match index {
            0 => Self::kind(options, input),
            1 => Self::drink(options, input),
            2 => Self::finish(options, input),
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

    fn run(frame: &mut DialogFrame, input: StepInput) -> (ResumeOutcome, Vec<OutgoingMessage>) {
        let mut outbox = Vec::new();
        let outcome =
            resume(&BreakfastDialog, frame, input, &mut StepContext::new(&mut outbox)).unwrap();
        (outcome, outbox)
    }

    #[test]
    fn begins_with_kind_choice() {
        let mut frame = DialogFrame::begin(FrameOptions::Breakfast(BreakfastOptions::default()));
        let (outcome, outbox) = run(&mut frame, StepInput::Begin);

        assert_eq!(outcome, ResumeOutcome::Suspended);
        assert_eq!(outbox[0].choices, Some(BreakfastKind::choice_set()));
    }

    #[test]
    fn unmatched_kind_reprompts_without_default() {
        let mut frame = DialogFrame::begin(FrameOptions::Breakfast(BreakfastOptions::default()));
        let (outcome, outbox) = run(&mut frame, answer("pancakes"));

        assert_eq!(outcome, ResumeOutcome::Suspended);
        assert_eq!(frame.step_index, 0);
        assert_eq!(outbox[0].text, prompts::RETRY_BREAKFAST_KIND);
        assert_eq!(frame.options, FrameOptions::Breakfast(BreakfastOptions::default()));
    }

    #[test]
    fn kind_then_drink_completes() {
        let mut frame = DialogFrame::begin(FrameOptions::Breakfast(BreakfastOptions::default()));
        let (_, outbox) = run(&mut frame, answer("Full English"));
        assert_eq!(frame.step_index, 1);
        assert_eq!(outbox[0].text, prompts::ASK_DRINK);

        let (outcome, _) = run(&mut frame, answer("coffee"));
        assert_eq!(
            outcome,
            ResumeOutcome::Completed(DialogResult::Breakfast(BreakfastPreference::new(
                BreakfastKind::FullEnglish,
                MorningDrink::Coffee
            )))
        );
    }

    #[test]
    fn seeded_kind_skips_to_drink() {
        let mut frame = DialogFrame::begin(FrameOptions::Breakfast(BreakfastOptions {
            kind: Some(BreakfastKind::Buffet),
            drink: None,
        }));
        let (_, outbox) = run(&mut frame, StepInput::Begin);

        assert_eq!(frame.step_index, 1);
        assert_eq!(outbox[0].choices, Some(MorningDrink::choice_set()));
    }
}
