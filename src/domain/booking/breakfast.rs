//! Breakfast preference value types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::choice::Choosable;

/// Kind of breakfast booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakfastKind {
    /// The sub-flow ended before a kind was chosen.
    NotDecided,
    /// Guest declined breakfast.
    None,
    Continental,
    FullEnglish,
    Traditional,
    Vegan,
    Buffet,
}

impl BreakfastKind {
    /// Name used in the booking summary.
    pub fn display_name(&self) -> &'static str {
        match self {
            BreakfastKind::NotDecided => "Breakfast not decided yet",
            BreakfastKind::None => "No breakfast booked",
            BreakfastKind::Continental => "Continental breakfast",
            BreakfastKind::FullEnglish => "Full English breakfast",
            BreakfastKind::Traditional => "Traditional breakfast",
            BreakfastKind::Vegan => "Vegan breakfast",
            BreakfastKind::Buffet => "Breakfast buffet",
        }
    }
}

impl Choosable for BreakfastKind {
    const CHOICE_SET: &'static str = "breakfast_kind";

    fn choices() -> &'static [Self] {
        &[
            BreakfastKind::Continental,
            BreakfastKind::FullEnglish,
            BreakfastKind::Traditional,
            BreakfastKind::Vegan,
            BreakfastKind::Buffet,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            BreakfastKind::NotDecided => "Not decided",
            BreakfastKind::None => "None",
            BreakfastKind::Continental => "Continental",
            BreakfastKind::FullEnglish => "Full English",
            BreakfastKind::Traditional => "Traditional",
            BreakfastKind::Vegan => "Vegan",
            BreakfastKind::Buffet => "Buffet",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            BreakfastKind::FullEnglish => &["english", "full english breakfast"],
            BreakfastKind::Continental => &["continental breakfast"],
            BreakfastKind::Buffet => &["breakfast buffet"],
            _ => &[],
        }
    }
}

/// Drink served with breakfast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorningDrink {
    /// No drink applies (no breakfast, or not asked yet).
    Unset,
    NoPreference,
    Coffee,
    BlackTea,
    GreenTea,
    HotChocolate,
}

impl Choosable for MorningDrink {
    const CHOICE_SET: &'static str = "morning_drink";

    fn choices() -> &'static [Self] {
        &[
            MorningDrink::NoPreference,
            MorningDrink::Coffee,
            MorningDrink::BlackTea,
            MorningDrink::GreenTea,
            MorningDrink::HotChocolate,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            MorningDrink::Unset | MorningDrink::NoPreference => "No preference",
            MorningDrink::Coffee => "Coffee",
            MorningDrink::BlackTea => "Black tea",
            MorningDrink::GreenTea => "Green tea",
            MorningDrink::HotChocolate => "Hot chocolate",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            MorningDrink::NoPreference => &["none", "nothing", "whatever", "don't care"],
            MorningDrink::BlackTea => &["tea"],
            MorningDrink::HotChocolate => &["chocolate", "cocoa"],
            _ => &[],
        }
    }
}

/// Breakfast kind together with the preferred drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakfastPreference {
    pub kind: BreakfastKind,
    pub drink: MorningDrink,
}

impl BreakfastPreference {
    /// Guest declined breakfast; the drink is moot.
    pub fn declined() -> Self {
        Self {
            kind: BreakfastKind::None,
            drink: MorningDrink::Unset,
        }
    }

    pub fn new(kind: BreakfastKind, drink: MorningDrink) -> Self {
        if kind == BreakfastKind::None {
            return Self::declined();
        }
        Self { kind, drink }
    }

    pub fn is_booked(&self) -> bool {
        !matches!(self.kind, BreakfastKind::None | BreakfastKind::NotDecided)
    }
}

impl fmt::Display for BreakfastPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_booked() {
            return write!(f, "{}", self.kind.display_name());
        }
        write!(f, "{} with {}", self.kind.display_name(), self.drink.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::ChoiceResolver;

    #[test]
    fn declined_breakfast_has_no_drink() {
        let pref = BreakfastPreference::new(BreakfastKind::None, MorningDrink::Coffee);
        assert_eq!(pref, BreakfastPreference::declined());
        assert!(!pref.is_booked());
    }

    #[test]
    fn display_of_booked_breakfast_names_kind_and_drink() {
        let pref = BreakfastPreference::new(BreakfastKind::FullEnglish, MorningDrink::GreenTea);
        assert_eq!(pref.to_string(), "Full English breakfast with Green tea");
    }

    #[test]
    fn display_of_declined_breakfast() {
        assert_eq!(BreakfastPreference::declined().to_string(), "No breakfast booked");
    }

    #[test]
    fn breakfast_choices_exclude_sentinels() {
        let set = BreakfastKind::choice_set();
        assert_eq!(
            set.options,
            vec!["Continental", "Full English", "Traditional", "Vegan", "Buffet"]
        );
        assert_eq!(ChoiceResolver::resolve::<BreakfastKind>("none"), None);
        assert_eq!(ChoiceResolver::resolve::<BreakfastKind>("not decided"), None);
    }

    #[test]
    fn drink_resolves_by_label_alias_and_position() {
        assert_eq!(
            ChoiceResolver::resolve::<MorningDrink>("green tea"),
            Some(MorningDrink::GreenTea)
        );
        assert_eq!(
            ChoiceResolver::resolve::<MorningDrink>("Cocoa"),
            Some(MorningDrink::HotChocolate)
        );
        assert_eq!(ChoiceResolver::resolve::<MorningDrink>("2"), Some(MorningDrink::Coffee));
        assert_eq!(ChoiceResolver::resolve::<MorningDrink>("orange juice"), None);
    }
}
