//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BOOKING_CONCIERGE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use booking_concierge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod dialog;
mod error;
mod features;
mod recognizer;
mod server;
mod storage;

pub use dialog::DialogConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use recognizer::{RecognizerConfig, RecognizerProvider};
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development setup: in-memory storage and an unconfigured recognizer.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Language understanding service
    #[serde(default)]
    pub recognizer: RecognizerConfig,

    /// Conversation store
    #[serde(default)]
    pub storage: StorageConfig,

    /// Dialog engine limits
    #[serde(default)]
    pub dialog: DialogConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BOOKING_CONCIERGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BOOKING_CONCIERGE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BOOKING_CONCIERGE__RECOGNIZER__CLU_API_KEY=...` -> `recognizer.clu_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BOOKING_CONCIERGE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.recognizer.validate(self.is_production())?;
        self.storage.validate()?;
        self.dialog.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
