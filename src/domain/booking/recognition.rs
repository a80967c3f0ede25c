//! Recognition results handed to the dialogs.
//!
//! A `Recognition` is what the language understanding service made of one
//! utterance: a score per intent and the entity texts it extracted. The
//! dialogs only read it; producing it is the job of a `Recognizer` adapter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Intents the hotel model distinguishes.
///
/// Declaration order doubles as the tie-break order of [`Recognition::top_intent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    None,
    Booking,
    HotelQuestion,
    Help,
    Confirm,
    Reject,
    Cancel,
}

impl Intent {
    /// All intents in tie-break order.
    pub const ALL: [Intent; 7] = [
        Intent::None,
        Intent::Booking,
        Intent::HotelQuestion,
        Intent::Help,
        Intent::Confirm,
        Intent::Reject,
        Intent::Cancel,
    ];

    /// Maps a service-side intent category (e.g. `"HotelQuestion"`) to an intent.
    pub fn from_category(category: &str) -> Option<Self> {
        let normalized: String = category
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "none" => Some(Intent::None),
            "booking" => Some(Intent::Booking),
            "hotelquestion" => Some(Intent::HotelQuestion),
            "help" => Some(Intent::Help),
            "confirm" => Some(Intent::Confirm),
            "reject" => Some(Intent::Reject),
            "cancel" => Some(Intent::Cancel),
            _ => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::None => "none",
            Intent::Booking => "booking",
            Intent::HotelQuestion => "hotel_question",
            Intent::Help => "help",
            Intent::Confirm => "confirm",
            Intent::Reject => "reject",
            Intent::Cancel => "cancel",
        };
        write!(f, "{}", s)
    }
}

/// Entity categories read from a recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityCategory {
    #[serde(rename = "BookingRequest.Adults")]
    Adults,
    #[serde(rename = "BookingRequest.Children")]
    Children,
    #[serde(rename = "BookingRequest.Arrival")]
    ArrivalDate,
    #[serde(rename = "BookingRequest.Nights")]
    LengthOfStay,
    #[serde(rename = "DateTime")]
    DateTime,
}

impl EntityCategory {
    /// Maps a service-side entity category to a known category.
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "BookingRequest.Adults" | "Adults" => Some(EntityCategory::Adults),
            "BookingRequest.Children" | "Children" => Some(EntityCategory::Children),
            "BookingRequest.Arrival" | "Arrival" | "ArrivalDate" => {
                Some(EntityCategory::ArrivalDate)
            }
            "BookingRequest.Nights" | "Nights" | "LengthOfStay" => {
                Some(EntityCategory::LengthOfStay)
            }
            "DateTime" | "datetime" => Some(EntityCategory::DateTime),
            _ => None,
        }
    }
}

/// Intents and entities recognized in one utterance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    pub text: String,
    pub intents: BTreeMap<Intent, f64>,
    pub entities: BTreeMap<EntityCategory, Vec<String>>,
}

impl Recognition {
    /// A recognition with no intents and no entities.
    pub fn empty(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Adds or replaces the score of an intent. Scores are clamped to `[0, 1]`.
    pub fn with_intent(mut self, intent: Intent, score: f64) -> Self {
        self.intents.insert(intent, score.clamp(0.0, 1.0));
        self
    }

    /// Appends an entity text under its category.
    pub fn with_entity(mut self, category: EntityCategory, text: impl Into<String>) -> Self {
        self.entities.entry(category).or_default().push(text.into());
        self
    }

    /// Intent with the strictly highest score.
    ///
    /// Ties go to the intent declared first; when every score is zero
    /// (or there are none) the result is `(Intent::None, 0.0)`.
    pub fn top_intent(&self) -> (Intent, f64) {
        let mut best = (Intent::None, 0.0);
        for (intent, score) in &self.intents {
            if *score > best.1 {
                best = (*intent, *score);
            }
        }
        best
    }

    /// Returns true if `intent` is the top intent.
    pub fn is_top(&self, intent: Intent) -> bool {
        self.top_intent().0 == intent
    }

    /// First extracted text of a category.
    pub fn first_entity(&self, category: EntityCategory) -> Option<&str> {
        self.entities
            .get(&category)
            .and_then(|texts| texts.first())
            .map(String::as_str)
    }
}
