//! Registry configuration — TOML with environment variable overrides.
//!
//! Every field has a sensible default so the TOML section is optional.
//! Environment variables take precedence over file values.

use serde::Deserialize;

/// Behaviour of a [`DeviceRegistry`](crate::registry::DeviceRegistry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Also refresh devices the gateway reports as disabled.
    pub refresh_disabled: bool,
}

impl RegistryConfig {
    /// Parse the configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Apply overrides from the process environment.
    ///
    /// Reads `GATEHUB_REFRESH_DISABLED` (`true`/`false`/`1`/`0`); unparsable
    /// values are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("GATEHUB_REFRESH_DISABLED").as_deref().and_then(parse_flag) {
            self.refresh_disabled = val;
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config")]
    Parse(#[source] toml::de::Error),
}
