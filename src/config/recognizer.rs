//! Recognizer configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which recognizer adapter to use
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecognizerProvider {
    /// Azure Conversational Language Understanding
    #[default]
    Clu,
    /// Local keyword rules
    Keyword,
    /// No recognizer; the concierge runs without intents
    None,
}

/// Recognizer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RecognizerConfig {
    #[serde(default)]
    pub provider: RecognizerProvider,

    /// CLU project name
    pub clu_project_name: Option<String>,

    /// CLU deployment name
    pub clu_deployment_name: Option<String>,

    /// CLU resource host name
    pub clu_api_host: Option<String>,

    /// CLU subscription key
    pub clu_api_key: Option<Secret<String>>,

    /// Utterance language
    #[serde(default = "default_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RecognizerConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when all four CLU settings are present and non-empty.
    pub fn is_clu_configured(&self) -> bool {
        let present = |value: &Option<String>| value.as_ref().is_some_and(|v| !v.trim().is_empty());
        present(&self.clu_project_name)
            && present(&self.clu_deployment_name)
            && present(&self.clu_api_host)
            && self
                .clu_api_key
                .as_ref()
                .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate recognizer configuration
    ///
    /// Missing CLU settings are not an error: the concierge then runs
    /// unconfigured and tells the user so.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if production && self.provider == RecognizerProvider::Clu {
            if let Some(host) = &self.clu_api_host {
                if host.starts_with("http://") {
                    return Err(ValidationError::RecognizerHostMustBeHttps);
                }
            }
        }
        Ok(())
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            provider: RecognizerProvider::default(),
            clu_project_name: None,
            clu_deployment_name: None,
            clu_api_host: None,
            clu_api_key: None,
            language: default_language(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout() -> u64 {
    10
}
