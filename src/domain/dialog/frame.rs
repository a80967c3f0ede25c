//! Dialog frames: one active dialog on the stack.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::booking::{BreakfastKind, MorningDrink, SlotBag};

/// Identifier of a registered dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogId {
    Booking,
    Breakfast,
    DateResolver,
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DialogId::Booking => "booking",
            DialogId::Breakfast => "breakfast",
            DialogId::DateResolver => "date_resolver",
        };
        write!(f, "{}", s)
    }
}

/// Partial breakfast preference carried by the breakfast frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakfastOptions {
    pub kind: Option<BreakfastKind>,
    pub drink: Option<MorningDrink>,
}

/// Seed expression and attempt counter carried by the date resolver frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateResolverOptions {
    pub seed: Option<String>,
    pub attempts: u32,
}

impl DateResolverOptions {
    pub fn seeded(seed: Option<String>) -> Self {
        Self { seed, attempts: 0 }
    }
}

/// The value a frame was pushed with, tagged by dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FrameOptions {
    Booking(SlotBag),
    Breakfast(BreakfastOptions),
    DateResolver(DateResolverOptions),
}

impl FrameOptions {
    /// Dialog this shape of options belongs to.
    pub fn dialog_id(&self) -> DialogId {
        match self {
            FrameOptions::Booking(_) => DialogId::Booking,
            FrameOptions::Breakfast(_) => DialogId::Breakfast,
            FrameOptions::DateResolver(_) => DialogId::DateResolver,
        }
    }
}

/// One active dialog and its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogFrame {
    pub dialog_id: DialogId,
    pub step_index: usize,
    pub options: FrameOptions,
}

impl DialogFrame {
    /// A frame positioned at the first step of the dialog its options belong to.
    pub fn begin(options: FrameOptions) -> Self {
        Self {
            dialog_id: options.dialog_id(),
            step_index: 0,
            options,
        }
    }

    /// Returns the booking slots if this is a booking frame.
    pub fn slot_bag(&self) -> Option<&SlotBag> {
        match &self.options {
            FrameOptions::Booking(bag) => Some(bag),
            _ => None,
        }
    }
}
