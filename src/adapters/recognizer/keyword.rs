//! Keyword Recognizer - A local, rule-based Recognizer.
//!
//! Lets the concierge run without a language understanding service while
//! still honouring help and cancel interruptions. Rules match whole words,
//! case-insensitively, and are checked in priority order: cancel, help,
//! confirm/reject, booking, hotel question. The first rule that matches
//! becomes the only intent, scored at [`KEYWORD_SCORE`].

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::booking::{EntityCategory, Intent, Recognition};
use crate::ports::{Recognizer, RecognizerError};

/// Score given to a keyword match.
pub const KEYWORD_SCORE: f64 = 0.9;

/// A count not preceded by a sign or decimal separator.
const COUNT: &str =
    r"(?:^|[^\w.,\-])(\d+|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve)";

static INTENT_RULES: Lazy<Vec<(Intent, Regex)>> = Lazy::new(|| {
    [
        (Intent::Cancel, r"(?i)\b(cancel|stop|quit|abort|never ?mind)\b"),
        (Intent::Help, r"(?i)\b(help|what can you do|how does this work)\b"),
        (Intent::Confirm, r"(?i)^\s*(yes|yeah|yep|sure|ok|okay|correct|please do)\b"),
        (Intent::Reject, r"(?i)^\s*(no|nope|nah|not really)\b"),
        (Intent::Booking, r"(?i)\b(book|booking|reserve|reservation|room|stay)\b"),
        (
            Intent::HotelQuestion,
            concat!(
                r"(?i)\b(check[- ]?in|check[- ]?out|wifi|wi-fi|",
                r"pool|gym|spa|restaurant|pets?|address)\b",
            ),
        ),
    ]
    .into_iter()
    .map(|(intent, pattern)| (intent, Regex::new(pattern).expect("valid intent pattern")))
    .collect()
});

static ADULTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i){}\s+(adults?|people|persons|guests)\b", COUNT))
        .expect("valid adults pattern")
});

static CHILDREN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i){}\s+(children|child|kids?)\b", COUNT))
        .expect("valid children pattern")
});

static NIGHTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i){}\s+nights?\b", COUNT)).expect("valid nights pattern")
});

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("valid date pattern"));

/// Rule-based recognizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRecognizer;

impl KeywordRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// Recognizes an utterance without any I/O.
    pub fn analyze(&self, utterance: &str) -> Recognition {
        let mut recognition = Recognition::empty(utterance);

        if let Some((intent, _)) = INTENT_RULES.iter().find(|(_, rule)| rule.is_match(utterance)) {
            recognition = recognition.with_intent(*intent, KEYWORD_SCORE);
        }

        for (category, pattern) in [
            (EntityCategory::Adults, &*ADULTS),
            (EntityCategory::Children, &*CHILDREN),
            (EntityCategory::LengthOfStay, &*NIGHTS),
        ] {
            if let Some(captures) = pattern.captures(utterance) {
                recognition = recognition.with_entity(category, &captures[1]);
            }
        }

        if let Some(date) = ISO_DATE.find(utterance) {
            recognition = recognition.with_entity(EntityCategory::ArrivalDate, date.as_str());
        }

        recognition
    }
}

#[async_trait]
impl Recognizer for KeywordRecognizer {
    fn is_configured(&self) -> bool {
        true
    }

    async fn recognize(&self, utterance: &str) -> Result<Recognition, RecognizerError> {
        Ok(self.analyze(utterance))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
