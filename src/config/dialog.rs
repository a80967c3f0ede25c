//! Dialog engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::dialog::DEFAULT_CASCADE_LIMIT;

/// Dialog engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DialogConfig {
    /// Ambiguous date answers accepted before the booking is abandoned.
    /// Unset means the date resolver asks forever.
    #[serde(default = "default_max_date_attempts")]
    pub max_date_attempts: Option<u32>,

    /// Frame transitions allowed within one turn.
    #[serde(default = "default_cascade_limit")]
    pub cascade_limit: usize,
}

impl DialogConfig {
    /// Validate dialog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_date_attempts == Some(0) {
            return Err(ValidationError::InvalidDateAttempts);
        }
        if self.cascade_limit == 0 || self.cascade_limit > 1024 {
            return Err(ValidationError::InvalidCascadeLimit);
        }
        Ok(())
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            max_date_attempts: default_max_date_attempts(),
            cascade_limit: default_cascade_limit(),
        }
    }
}

fn default_max_date_attempts() -> Option<u32> {
    Some(5)
}

fn default_cascade_limit() -> usize {
    DEFAULT_CASCADE_LIMIT
}
