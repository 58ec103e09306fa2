//! TOML-based service configuration.
//!
//! Holds the defaults the service applies when it creates streaks:
//!
//! ```toml
//! [defaults]
//! notify_before_minutes = 120
//! ```
//!
//! Missing keys fall back to their defaults.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::streak::DEFAULT_NOTIFY_BEFORE_SECS;

/// Defaults applied to newly created streaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_notify_before_minutes")]
    pub notify_before_minutes: i64,
}

/// Service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

fn default_notify_before_minutes() -> i64 {
    DEFAULT_NOTIFY_BEFORE_SECS / 60
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            notify_before_minutes: default_notify_before_minutes(),
        }
    }
}

impl StreakConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or holds an
    /// invalid value.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: StreakConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds an
    /// invalid value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("Using default streak configuration: {}", e);
                Self::default()
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::FileAccess {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-positive or
    /// out-of-range notify-before lead time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let minutes = self.defaults.notify_before_minutes;
        if minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "defaults.notify_before_minutes".into(),
                message: format!("must be positive, got {minutes}"),
            });
        }
        if Duration::try_minutes(minutes).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "defaults.notify_before_minutes".into(),
                message: format!("out of range: {minutes}"),
            });
        }
        Ok(())
    }

    /// Default notify-before lead time for new streaks.
    ///
    /// Falls back to the built-in default if the value was never validated
    /// and is out of range.
    pub fn notify_before(&self) -> Duration {
        Duration::try_minutes(self.defaults.notify_before_minutes)
            .filter(|d| *d > Duration::zero())
            .unwrap_or_else(|| Duration::seconds(DEFAULT_NOTIFY_BEFORE_SECS))
    }
}
