//! Booking module - the hotel booking vocabulary.
//!
//! Slot values, closed choice sets, answer parsing and date handling used by
//! the booking dialogs.

mod answers;
mod breakfast;
mod choice;
pub mod prompts;
mod recognition;
mod slot_bag;
mod timex;

pub use answers::{allergies, extract_count, free_text, resolve_confirmation};
pub use breakfast::{BreakfastKind, BreakfastPreference, MorningDrink};
pub use choice::{ChoiceResolver, ChoiceSet, Choosable};
pub use recognition::{EntityCategory, Intent, Recognition};
pub use slot_bag::{PaymentMethod, PillowType, SlotBag};
pub use timex::{AmbiguityResolver, DateExpression};
