//! Date expression handling for the arrival slot.
//!
//! Recognizers hand over date/time expressions in TIMEX form
//! (`2025-06-14`, `2025-06-14T15`, `XXXX-WXX-2` for "Tuesday"), users type
//! whatever they like. Only an expression that names one calendar day is
//! accepted as an arrival.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TIMEX_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})[T ](\d{1,2})(?::(\d{2}))?(?::(\d{2}))?$")
        .expect("valid timex regex")
});

/// Recognizer-side TIMEX such as `XXXX-WXX-2` or `XXXX-06-14T15`.
static TIMEX_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9X]{4}-(?:W[0-9X]{2}|[0-9X]{2})(?:-[0-9X]{1,2})?(?:T[0-9A-Z:]+)?$")
        .expect("valid timex shape regex")
});

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d.%m.%Y", "%B %d, %Y", "%d %B %Y", "%b %d, %Y"];

/// A parsed date expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateExpression {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Anything that does not name exactly one day.
    Ambiguous(String),
}

impl DateExpression {
    pub fn parse(expr: &str) -> Self {
        let trimmed = expr.trim();

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return DateExpression::Date(date);
            }
        }

        if let Some(dt) = parse_timex_datetime(trimmed) {
            return DateExpression::DateTime(dt);
        }

        DateExpression::Ambiguous(trimmed.to_string())
    }

    pub fn is_definite(&self) -> bool {
        !matches!(self, DateExpression::Ambiguous(_))
    }
}

/// Canonical TIMEX rendering: `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM`.
impl fmt::Display for DateExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateExpression::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DateExpression::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M")),
            DateExpression::Ambiguous(raw) => write!(f, "{}", raw),
        }
    }
}

fn parse_timex_datetime(expr: &str) -> Option<NaiveDateTime> {
    let caps = TIMEX_DATETIME.captures(expr)?;
    let date = NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%Y-%m-%d").ok()?;
    let hour: u32 = caps.get(2)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(3).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    let second: u32 = caps.get(4).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(NaiveDateTime::new(date, time))
}

/// Decides whether a date/time expression is fully determined.
pub struct AmbiguityResolver;

impl AmbiguityResolver {
    pub fn is_definite(expr: &str) -> bool {
        DateExpression::parse(expr).is_definite()
    }

    /// True for machine TIMEX rather than words a guest typed.
    pub fn is_timex_shaped(expr: &str) -> bool {
        TIMEX_SHAPE.is_match(expr.trim())
    }

    /// Canonical form of a definite expression; `None` when ambiguous.
    pub fn normalize(expr: &str) -> Option<String> {
        let parsed = DateExpression::parse(expr);
        parsed.is_definite().then(|| parsed.to_string())
    }
}
