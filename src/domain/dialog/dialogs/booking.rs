//! Room booking dialog: the root waterfall that fills the SlotBag.

use crate::domain::booking::{
    allergies, extract_count, free_text, prompts, resolve_confirmation, AmbiguityResolver,
    BreakfastKind, BreakfastPreference, ChoiceResolver, ChoiceSet, Choosable, SlotBag,
};
use crate::domain::dialog::errors::DialogError;
use crate::domain::dialog::frame::{BreakfastOptions, DateResolverOptions, DialogId, FrameOptions};
use crate::domain::dialog::message::OutgoingMessage;
use crate::domain::dialog::step::{
    DialogResult, StepContext, StepInput, StepOutcome, StepValue, UserAnswer,
};
use crate::domain::dialog::waterfall::Dialog;

const STEPS: &[&str] = &[
    "guests",
    "children",
    "breakfast",
    "arrival",
    "nights",
    "payment",
    "parking",
    "pillow",
    "allergies",
    "age_verified",
    "guest_name",
    "summary",
];

/// Collects every booking slot, skipping the ones already known.
#[derive(Debug, Default)]
pub struct BookingDialog;

impl BookingDialog {
    pub fn new() -> Self {
        Self
    }
}

impl Dialog for BookingDialog {
    fn id(&self) -> DialogId {
        DialogId::Booking
    }

    fn steps(&self) -> &'static [&'static str] {
        STEPS
    }

    fn run_step(
        &self,
        index: usize,
        options: &mut FrameOptions,
        input: StepInput,
        ctx: &mut StepContext<'_>,
    ) -> Result<StepOutcome, DialogError> {
        let found = options.dialog_id();
        let FrameOptions::Booking(bag) = options else {
            return Err(DialogError::OptionsMismatch {
                dialog: self.id(),
                found,
            });
        };

        let step = Step { index, input };
        match index {
            0 => step.guests(bag),
            1 => step.children(bag),
            2 => step.breakfast(bag),
            3 => step.arrival(bag, ctx),
            4 => step.nights(bag),
            5 => step.choice(
                &mut bag.payment,
                prompts::ASK_PAYMENT,
                prompts::RETRY_PAYMENT,
                StepValue::Payment,
            ),
            6 => step.yes_no(&mut bag.parking, prompts::ASK_PARKING),
            7 => step.choice(
                &mut bag.pillow,
                prompts::ASK_PILLOW,
                prompts::RETRY_PILLOW,
                StepValue::Pillow,
            ),
            8 => step.allergies(bag),
            9 => step.yes_no(&mut bag.age_verified, prompts::ASK_AGE_VERIFIED),
            10 => step.guest_name(bag),
            11 => step.summary(bag, ctx),
            _ => Err(DialogError::StepOutOfRange {
                dialog: self.id(),
                index,
                count: STEPS.len(),
            }),
        }
    }
}

/// One invocation of a booking step.
struct Step {
    index: usize,
    input: StepInput,
}

fn unexpected(index: usize, input: &StepInput) -> DialogError {
    DialogError::UnexpectedInput {
        dialog: DialogId::Booking,
        index,
        input: input.kind(),
    }
}

/// Yes/no from words, intents or the position in the Yes/No set.
fn confirmation(answer: &UserAnswer) -> Option<bool> {
    resolve_confirmation(&answer.text, &answer.recognition).or_else(|| {
        ChoiceResolver::resolve_index(&ChoiceSet::yes_no(), &answer.text).map(|i| i == 0)
    })
}

impl Step {
    /// Splits the input into "the user answered" and "value may already be known".
    fn answer(self) -> Result<Option<UserAnswer>, DialogError> {
        match self.input {
            StepInput::AnswerFromUser(answer) => Ok(Some(answer)),
            StepInput::Begin | StepInput::Advanced(_) => Ok(None),
            other @ StepInput::ResultFromChild(_) => Err(unexpected(self.index, &other)),
        }
    }

    fn guests(self, bag: &mut SlotBag) -> Result<StepOutcome, DialogError> {
        Ok(match self.answer()? {
            None => match bag.guests {
                Some(n) => StepOutcome::Next(StepValue::Count(n)),
                None => StepOutcome::Prompt(OutgoingMessage::prompt(prompts::ASK_GUESTS)),
            },
            Some(answer) => match extract_count(&answer.text).filter(|n| *n >= 1) {
                Some(n) => {
                    bag.guests = Some(n);
                    StepOutcome::Next(StepValue::Count(n))
                }
                None => StepOutcome::Prompt(OutgoingMessage::prompt(prompts::RETRY_GUESTS)),
            },
        })
    }

    fn children(self, bag: &mut SlotBag) -> Result<StepOutcome, DialogError> {
        let max = bag.guests.unwrap_or(u32::MAX);
        Ok(match self.answer()? {
            None => match bag.children {
                Some(n) => StepOutcome::Next(StepValue::Count(n)),
                None => StepOutcome::Prompt(OutgoingMessage::prompt(prompts::ASK_CHILDREN)),
            },
            Some(answer) => match extract_count(&answer.text).filter(|n| *n <= max) {
                Some(n) => {
                    bag.children = Some(n);
                    StepOutcome::Next(StepValue::Count(n))
                }
                None => StepOutcome::Prompt(OutgoingMessage::prompt(prompts::retry_children(max))),
            },
        })
    }

    fn breakfast(self, bag: &mut SlotBag) -> Result<StepOutcome, DialogError> {
        match self.input {
            StepInput::ResultFromChild(DialogResult::Breakfast(pref)) => {
                bag.breakfast = Some(pref);
                Ok(StepOutcome::Next(StepValue::Breakfast(pref)))
            }
            other @ StepInput::ResultFromChild(_) => Err(unexpected(self.index, &other)),
            StepInput::Begin | StepInput::Advanced(_) => Ok(match bag.breakfast {
                Some(pref) => StepOutcome::Next(StepValue::Breakfast(pref)),
                None => StepOutcome::Prompt(OutgoingMessage::choice(
                    prompts::ASK_BREAKFAST,
                    ChoiceSet::yes_no(),
                )),
            }),
            StepInput::AnswerFromUser(answer) => {
                // Naming a kind straight away counts as a yes.
                if let Some(kind) = ChoiceResolver::resolve_label::<BreakfastKind>(&answer.text) {
                    return Ok(StepOutcome::BeginChild(FrameOptions::Breakfast(
                        BreakfastOptions {
                            kind: Some(kind),
                            drink: None,
                        },
                    )));
                }
                Ok(match confirmation(&answer) {
                    Some(true) => StepOutcome::BeginChild(FrameOptions::Breakfast(
                        BreakfastOptions::default(),
                    )),
                    Some(false) => {
                        let pref = BreakfastPreference::declined();
                        bag.breakfast = Some(pref);
                        StepOutcome::Next(StepValue::Breakfast(pref))
                    }
                    None => StepOutcome::Prompt(OutgoingMessage::choice(
                        prompts::RETRY_YES_NO,
                        ChoiceSet::yes_no(),
                    )),
                })
            }
        }
    }

    fn arrival(
        self,
        bag: &mut SlotBag,
        ctx: &mut StepContext<'_>,
    ) -> Result<StepOutcome, DialogError> {
        match self.input {
            StepInput::Begin | StepInput::Advanced(_) => {
                let known = bag.arrival.as_deref().and_then(AmbiguityResolver::normalize);
                Ok(match known {
                    Some(date) => {
                        bag.arrival = Some(date.clone());
                        StepOutcome::Next(StepValue::Date(date))
                    }
                    None => StepOutcome::BeginChild(FrameOptions::DateResolver(
                        DateResolverOptions::seeded(bag.arrival.clone()),
                    )),
                })
            }
            StepInput::ResultFromChild(DialogResult::Date(date)) => {
                bag.arrival = Some(date.clone());
                Ok(StepOutcome::Next(StepValue::Date(date)))
            }
            StepInput::ResultFromChild(DialogResult::DateUnresolved) => {
                ctx.send(OutgoingMessage::text(prompts::DATE_UNRESOLVED));
                Ok(StepOutcome::End(DialogResult::Cancelled))
            }
            other => Err(unexpected(self.index, &other)),
        }
    }

    fn nights(self, bag: &mut SlotBag) -> Result<StepOutcome, DialogError> {
        Ok(match self.answer()? {
            None => match bag.nights {
                Some(n) => StepOutcome::Next(StepValue::Count(n)),
                None => StepOutcome::Prompt(OutgoingMessage::prompt(prompts::ASK_NIGHTS)),
            },
            Some(answer) => match extract_count(&answer.text).filter(|n| *n >= 1) {
                Some(n) => {
                    bag.nights = Some(n);
                    StepOutcome::Next(StepValue::Count(n))
                }
                None => StepOutcome::Prompt(OutgoingMessage::prompt(prompts::RETRY_NIGHTS)),
            },
        })
    }

    fn choice<T: Choosable>(
        self,
        slot: &mut Option<T>,
        ask: &str,
        retry: &str,
        wrap: fn(T) -> StepValue,
    ) -> Result<StepOutcome, DialogError> {
        Ok(match self.answer()? {
            None => match *slot {
                Some(value) => StepOutcome::Next(wrap(value)),
                None => StepOutcome::Prompt(OutgoingMessage::choice(ask, T::choice_set())),
            },
            Some(answer) => match ChoiceResolver::resolve::<T>(&answer.text) {
                Some(value) => {
                    *slot = Some(value);
                    StepOutcome::Next(wrap(value))
                }
                None => StepOutcome::Prompt(OutgoingMessage::choice(retry, T::choice_set())),
            },
        })
    }

    fn yes_no(self, slot: &mut Option<bool>, ask: &str) -> Result<StepOutcome, DialogError> {
        Ok(match self.answer()? {
            None => match *slot {
                Some(flag) => StepOutcome::Next(StepValue::Flag(flag)),
                None => StepOutcome::Prompt(OutgoingMessage::choice(ask, ChoiceSet::yes_no())),
            },
            Some(answer) => match confirmation(&answer) {
                Some(flag) => {
                    *slot = Some(flag);
                    StepOutcome::Next(StepValue::Flag(flag))
                }
                None => StepOutcome::Prompt(OutgoingMessage::choice(
                    prompts::RETRY_YES_NO,
                    ChoiceSet::yes_no(),
                )),
            },
        })
    }

    fn allergies(self, bag: &mut SlotBag) -> Result<StepOutcome, DialogError> {
        Ok(match self.answer()? {
            None => match &bag.allergies {
                Some(text) => StepOutcome::Next(StepValue::Text(text.clone())),
                None => StepOutcome::Prompt(OutgoingMessage::prompt(prompts::ASK_ALLERGIES)),
            },
            Some(answer) => match allergies(&answer.text, &answer.recognition) {
                Some(text) => {
                    bag.allergies = Some(text.clone());
                    StepOutcome::Next(StepValue::Text(text))
                }
                None => StepOutcome::Prompt(OutgoingMessage::prompt(prompts::RETRY_FREE_TEXT)),
            },
        })
    }

    fn guest_name(self, bag: &mut SlotBag) -> Result<StepOutcome, DialogError> {
        Ok(match self.answer()? {
            None => match &bag.guest_name {
                Some(name) => StepOutcome::Next(StepValue::Text(name.clone())),
                None => StepOutcome::Prompt(OutgoingMessage::prompt(prompts::ASK_GUEST_NAME)),
            },
            Some(answer) => match free_text(&answer.text) {
                Some(name) => {
                    bag.guest_name = Some(name.clone());
                    StepOutcome::Next(StepValue::Text(name))
                }
                None => StepOutcome::Prompt(OutgoingMessage::prompt(prompts::RETRY_FREE_TEXT)),
            },
        })
    }

    fn summary(
        self,
        bag: &mut SlotBag,
        ctx: &mut StepContext<'_>,
    ) -> Result<StepOutcome, DialogError> {
        match self.input {
            StepInput::Begin | StepInput::Advanced(_) => {
                ctx.send(OutgoingMessage::text(prompts::booking_summary(&bag.to_string())));
                ctx.send(OutgoingMessage::text(prompts::THANK_YOU));
                Ok(StepOutcome::End(DialogResult::Booking(bag.clone())))
            }
            other => Err(unexpected(self.index, &other)),
        }
    }
}
