//! Engine configuration.
//!
//! All fields have defaults, so an empty TOML document (or
//! `NoganConfig::default()`) is a valid configuration.
//!
//! ```toml
//! max_history = 32
//! horizon_padding = 2
//! validate = true
//! ```

use crate::fixed::Timing;
use serde::{Deserialize, Serialize};

/// Tunables for advancing and resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoganConfig {
    /// Snapshots retained by [`crate::advance::History`]. 0 keeps none.
    pub max_history: usize,
    /// Extra moments added to the resolver's search window.
    pub horizon_padding: Timing,
    /// Check structural invariants after advancing or applying operations.
    pub validate: bool,
}

impl Default for NoganConfig {
    fn default() -> Self {
        Self {
            max_history: 16,
            horizon_padding: 0,
            validate: false,
        }
    }
}

/// Errors that can occur while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[cfg(feature = "config-loader")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("horizon_padding must not be negative, got {0}")]
    NegativePadding(Timing),
}

impl NoganConfig {
    /// Reject values the engine cannot use.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.horizon_padding < 0 {
            return Err(ConfigError::NegativePadding(self.horizon_padding));
        }
        Ok(())
    }

    /// Parse a configuration from a TOML document.
    #[cfg(feature = "config-loader")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: NoganConfig = toml::from_str(source)?;
        config.check()?;
        Ok(config)
    }
}
