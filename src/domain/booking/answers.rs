//! Parsing of free-form answers: counts, yes/no and free text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::recognition::{Intent, Recognition};

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid number regex"));

const NUMBER_WORDS: [(&str, u32); 13] = [
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
];

const YES_WORDS: [&str; 10] = [
    "yes", "y", "yeah", "yep", "sure", "ok", "okay", "please", "absolutely", "correct",
];

const NO_WORDS: [&str; 7] = ["no", "n", "nope", "nah", "none", "never", "negative"];

/// Whole answers that mean "no allergies".
const DECLINE_PHRASES: [&str; 8] = [
    "no",
    "none",
    "nope",
    "nothing",
    "no allergies",
    "n/a",
    "no thanks",
    "none at all",
];

/// Words that can surround a bare decline without adding information.
const DECLINE_FILLER: [&str; 14] = [
    "no", "nope", "nah", "none", "nothing", "not", "any", "allergies", "allergy", "thanks",
    "thank", "you", "at", "all",
];

/// Extracts the first count in an answer.
///
/// Digits win over number words, so `"2 adults and one child"` yields 2.
/// Digits that belong to a signed, fractional or exponent number (`"-3"`,
/// `"2.5"`, `"1e9"`) are not a count. `"no"`/`"none"` alone count as zero.
pub fn extract_count(text: &str) -> Option<u32> {
    if let Some(m) = NUMBER.find(text) {
        if !is_whole_count(text, m.start(), m.end()) {
            return None;
        }
        return m.as_str().parse().ok();
    }

    let words = words(text);
    if let Some(n) = words
        .iter()
        .find_map(|w| NUMBER_WORDS.iter().find(|(name, _)| name == w).map(|(_, n)| *n))
    {
        return Some(n);
    }

    match words.as_slice() {
        [only] if only == "no" || only == "none" => Some(0),
        _ => None,
    }
}

/// Decides a yes/no answer.
///
/// `Confirm`/`Reject` intents from the recognizer win; otherwise the first
/// word of the answer is matched locally so the step still works without
/// a recognizer.
pub fn resolve_confirmation(answer: &str, recognition: &Recognition) -> Option<bool> {
    match recognition.top_intent().0 {
        Intent::Confirm => return Some(true),
        Intent::Reject => return Some(false),
        _ => {}
    }

    let words = words(answer);
    let first = words.first()?;
    if YES_WORDS.contains(&first.as_str()) {
        Some(true)
    } else if NO_WORDS.contains(&first.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Normalizes a free-text answer; blank answers are rejected.
pub fn free_text(answer: &str) -> Option<String> {
    let text = answer.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Free-text answer to "any allergies?" where a plain no is stored as `"none"`.
///
/// Anything beyond a bare decline is kept verbatim: "No nuts please" is an
/// allergy, even when the recognizer scored it as `Reject`.
pub fn allergies(answer: &str, recognition: &Recognition) -> Option<String> {
    let text = free_text(answer)?;
    let lowered = text.to_lowercase();
    let phrase = lowered.trim_end_matches(|c: char| c == '.' || c == '!');

    let only_filler = words(phrase)
        .iter()
        .all(|w| DECLINE_FILLER.contains(&w.as_str()));
    let declined = DECLINE_PHRASES.contains(&phrase)
        || (only_filler && recognition.is_top(Intent::Reject));

    if declined {
        Some("none".to_string())
    } else {
        Some(text)
    }
}

/// The digits at `start..end` are neither signed nor followed by a decimal
/// or exponent part.
fn is_whole_count(text: &str, start: usize, end: usize) -> bool {
    let signed = matches!(text[..start].chars().next_back(), Some('-' | '.' | ','));
    let mut rest = text[end..].chars();
    let continued = matches!(
        (rest.next(), rest.next()),
        (Some('.' | ',' | 'e' | 'E'), Some(d)) if d.is_ascii_digit()
    );
    !signed && !continued
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
