//! Conversation storage configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Which conversation store to use
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
    Postgres,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// PostgreSQL connection URL
    pub database_url: Option<String>,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

impl StorageConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend != StorageBackend::Postgres {
            return Ok(());
        }
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ValidationError::MissingRequired("STORAGE__DATABASE_URL"))?;
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            directory: default_directory(),
            database_url: None,
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("./data/conversations")
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres(url: Option<&str>) -> StorageConfig {
        StorageConfig {
            backend: StorageBackend::Postgres,
            database_url: url.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_memory_backend_needs_nothing() {
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        assert_eq!(
            postgres(None).validate(),
            Err(ValidationError::MissingRequired("STORAGE__DATABASE_URL"))
        );
        assert_eq!(
            postgres(Some("mysql://x")).validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
        assert!(postgres(Some("postgres://localhost/bookings")).validate().is_ok());
    }

    #[test]
    fn test_pool_size_constraints() {
        let mut config = postgres(Some("postgresql://localhost/bookings"));
        config.min_connections = 20;
        assert_eq!(config.validate(), Err(ValidationError::InvalidPoolSize));

        config.min_connections = 1;
        config.max_connections = 200;
        assert_eq!(config.validate(), Err(ValidationError::PoolSizeTooLarge));
    }
}
