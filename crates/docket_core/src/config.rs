//! Entry store configuration.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key the collection is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "dockets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyStorageKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStorageKey => write!(f, "storage key cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one `EntryStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key holding the serialized collection.
    pub storage_key: String,
}

impl StoreConfig {
    pub fn with_storage_key(storage_key: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            storage_key: storage_key.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, DEFAULT_STORAGE_KEY};

    #[test]
    fn default_uses_dockets_key() {
        assert_eq!(StoreConfig::default().storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn blank_key_is_rejected() {
        assert_eq!(
            StoreConfig::with_storage_key("  ").unwrap_err(),
            ConfigError::EmptyStorageKey
        );
    }
}
