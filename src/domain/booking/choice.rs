//! Closed choice sets and the resolver that maps free text onto them.

use serde::{Deserialize, Serialize};

/// Named, ordered list of display strings offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSet {
    pub name: String,
    pub options: Vec<String>,
}

impl ChoiceSet {
    pub fn new<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Yes/No set used by confirmation prompts.
    pub fn yes_no() -> Self {
        Self::new("yes_no", ["Yes", "No"])
    }
}

/// A closed enumeration the user picks from by name or position.
pub trait Choosable: Sized + Copy + 'static {
    /// Name of the choice set, used in prompts and logs.
    const CHOICE_SET: &'static str;

    /// Selectable values in display order.
    fn choices() -> &'static [Self];

    /// Label shown in the prompt.
    fn label(&self) -> &'static str;

    /// Extra spellings accepted for this value.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// The display set offered to the user.
    fn choice_set() -> ChoiceSet {
        ChoiceSet::new(Self::CHOICE_SET, Self::choices().iter().map(|c| c.label()))
    }
}

/// Maps a raw selection onto a choice set.
///
/// A selection matches by case-insensitive label, by alias, or by its
/// 1-based position in the set. Anything else is no match; there is no
/// fuzzy matching.
pub struct ChoiceResolver;

impl ChoiceResolver {
    /// Resolves `raw` against a typed choice set.
    pub fn resolve<T: Choosable>(raw: &str) -> Option<T> {
        let choices = T::choices();
        Self::resolve_label(raw)
            .or_else(|| position(&normalize(raw), choices.len()).map(|i| choices[i]))
    }

    /// Like [`ChoiceResolver::resolve`] but ignores positional answers, for
    /// questions where a number would mean something else.
    pub fn resolve_label<T: Choosable>(raw: &str) -> Option<T> {
        let wanted = normalize(raw);
        if wanted.is_empty() {
            return None;
        }
        T::choices()
            .iter()
            .find(|c| {
                normalize(c.label()) == wanted || c.aliases().iter().any(|a| normalize(a) == wanted)
            })
            .copied()
    }

    /// Resolves `raw` against an untyped set, returning the option index.
    pub fn resolve_index(set: &ChoiceSet, raw: &str) -> Option<usize> {
        let wanted = normalize(raw);
        if wanted.is_empty() {
            return None;
        }
        set.options
            .iter()
            .position(|o| normalize(o) == wanted)
            .or_else(|| position(&wanted, set.options.len()))
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| c == '.' || c == '!')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn position(wanted: &str, len: usize) -> Option<usize> {
    wanted
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Colour {
        Red,
        DarkBlue,
    }

    impl Choosable for Colour {
        const CHOICE_SET: &'static str = "colour";

        fn choices() -> &'static [Self] {
            &[Colour::Red, Colour::DarkBlue]
        }

        fn label(&self) -> &'static str {
            match self {
                Colour::Red => "Red",
                Colour::DarkBlue => "Dark blue",
            }
        }

        fn aliases(&self) -> &'static [&'static str] {
            match self {
                Colour::DarkBlue => &["navy"],
                _ => &[],
            }
        }
    }

    #[test]
    fn resolves_by_label_ignoring_case_and_spacing() {
        assert_eq!(ChoiceResolver::resolve::<Colour>("  dark   BLUE "), Some(Colour::DarkBlue));
        assert_eq!(ChoiceResolver::resolve::<Colour>("red."), Some(Colour::Red));
    }

    #[test]
    fn resolves_by_alias() {
        assert_eq!(ChoiceResolver::resolve::<Colour>("Navy"), Some(Colour::DarkBlue));
    }

    #[test]
    fn resolves_by_position() {
        assert_eq!(ChoiceResolver::resolve::<Colour>("2"), Some(Colour::DarkBlue));
        assert_eq!(ChoiceResolver::resolve::<Colour>("3"), None);
        assert_eq!(ChoiceResolver::resolve::<Colour>("0"), None);
    }

    #[test]
    fn resolve_label_ignores_positions() {
        assert_eq!(ChoiceResolver::resolve_label::<Colour>("1"), None);
        assert_eq!(ChoiceResolver::resolve_label::<Colour>("red"), Some(Colour::Red));
    }

    #[test]
    fn unknown_text_is_no_match() {
        assert_eq!(ChoiceResolver::resolve::<Colour>("purple"), None);
        assert_eq!(ChoiceResolver::resolve::<Colour>(""), None);
        assert_eq!(ChoiceResolver::resolve::<Colour>("re"), None);
    }

    #[test]
    fn choice_set_lists_labels_in_order() {
        let set = Colour::choice_set();
        assert_eq!(set.name, "colour");
        assert_eq!(set.options, vec!["Red", "Dark blue"]);
    }

    #[test]
    fn resolve_index_works_on_untyped_sets() {
        let set = ChoiceSet::yes_no();
        assert_eq!(ChoiceResolver::resolve_index(&set, "no"), Some(1));
        assert_eq!(ChoiceResolver::resolve_index(&set, "1"), Some(0));
        assert_eq!(ChoiceResolver::resolve_index(&set, "maybe"), None);
    }
}
