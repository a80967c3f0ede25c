//! SlotBag - the booking fields collected over a conversation.
//!
//! Every slot is an `Option`; `None` means "not asked yet" and no legal
//! value is reused as a sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::answers::extract_count;
use super::breakfast::BreakfastPreference;
use super::choice::Choosable;
use super::recognition::{EntityCategory, Recognition};

/// How the guest intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Cash,
    BankTransfer,
}

impl Choosable for PaymentMethod {
    const CHOICE_SET: &'static str = "payment_method";

    fn choices() -> &'static [Self] {
        &[
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::Cash,
            PaymentMethod::BankTransfer,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::DebitCard => "Debit card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank transfer",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            PaymentMethod::CreditCard => &["credit", "visa", "mastercard"],
            PaymentMethod::DebitCard => &["debit", "ec card"],
            PaymentMethod::BankTransfer => &["transfer", "wire transfer"],
            PaymentMethod::Cash => &[],
        }
    }
}

/// Pillow the guest would like on the bed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillowType {
    Feather,
    MemoryFoam,
    Hypoallergenic,
    Firm,
}

impl Choosable for PillowType {
    const CHOICE_SET: &'static str = "pillow_type";

    fn choices() -> &'static [Self] {
        &[
            PillowType::Feather,
            PillowType::MemoryFoam,
            PillowType::Hypoallergenic,
            PillowType::Firm,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            PillowType::Feather => "Feather",
            PillowType::MemoryFoam => "Memory foam",
            PillowType::Hypoallergenic => "Hypoallergenic",
            PillowType::Firm => "Firm",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            PillowType::Feather => &["down", "soft"],
            PillowType::MemoryFoam => &["foam"],
            _ => &[],
        }
    }
}

/// Booking fields accumulated so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotBag {
    pub guests: Option<u32>,
    pub children: Option<u32>,
    pub breakfast: Option<BreakfastPreference>,
    pub arrival: Option<String>,
    pub nights: Option<u32>,
    pub payment: Option<PaymentMethod>,
    pub parking: Option<bool>,
    pub pillow: Option<PillowType>,
    pub allergies: Option<String>,
    pub age_verified: Option<bool>,
    pub guest_name: Option<String>,
}

impl SlotBag {
    /// Seeds a bag from the entities of the utterance that started the booking.
    ///
    /// Entities that do not parse, or that break a slot's range, stay unknown
    /// and are asked for later.
    pub fn seeded_from(recognition: &Recognition) -> Self {
        let guests = recognition
            .first_entity(EntityCategory::Adults)
            .and_then(extract_count)
            .filter(|n| *n >= 1);

        let children = recognition
            .first_entity(EntityCategory::Children)
            .and_then(extract_count)
            .filter(|n| guests.map_or(false, |g| *n <= g));

        let arrival = recognition
            .first_entity(EntityCategory::ArrivalDate)
            .or_else(|| recognition.first_entity(EntityCategory::DateTime))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let nights = recognition
            .first_entity(EntityCategory::LengthOfStay)
            .and_then(extract_count)
            .filter(|n| *n >= 1);

        Self {
            guests,
            children,
            arrival,
            nights,
            ..Self::default()
        }
    }

    /// Returns true once every slot has a value.
    pub fn is_complete(&self) -> bool {
        self.guests.is_some()
            && self.children.is_some()
            && self.breakfast.is_some()
            && self.arrival.is_some()
            && self.nights.is_some()
            && self.payment.is_some()
            && self.parking.is_some()
            && self.pillow.is_some()
            && self.allergies.is_some()
            && self.age_verified.is_some()
            && self.guest_name.is_some()
    }
}

fn or_dash<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

/// Summary shown to the guest when the booking completes.
impl fmt::Display for SlotBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", or_dash(&self.guest_name))?;
        writeln!(f, "Guests: {}", or_dash(&self.guests))?;
        writeln!(f, "Children under 16: {}", or_dash(&self.children))?;
        writeln!(f, "Arrival: {}", or_dash(&self.arrival))?;
        writeln!(f, "Nights: {}", or_dash(&self.nights))?;
        writeln!(f, "Breakfast: {}", or_dash(&self.breakfast))?;
        writeln!(
            f,
            "Payment: {}",
            self.payment.map(|p| p.label()).unwrap_or("-")
        )?;
        writeln!(f, "Parking: {}", yes_no(self.parking))?;
        writeln!(
            f,
            "Pillow: {}",
            self.pillow.map(|p| p.label()).unwrap_or("-")
        )?;
        writeln!(f, "Allergies: {}", or_dash(&self.allergies))?;
        write!(f, "Age verified: {}", yes_no(self.age_verified))
    }
}
