//! Configuration types for SafeIntent.

use std::fs;
use std::path::Path;

use safeintent_model::ParcelLimits;
use serde::{Deserialize, Serialize};

use crate::error::SafeIntentError;
use crate::Result;

/// Prefix of reader-mode URLs that wrap the real target.
pub const READER_URL_PREFIX: &str = "about:reader?url=";

/// Tag attached to every diagnostic by default.
pub const DEFAULT_LOG_TAG: &str = "SafeIntent";

/// Configuration for the guarded accessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Tag attached to every diagnostic.
    pub log_tag: String,

    /// Prefixes stripped from the data URI at construction.
    pub strip_prefixes: Vec<String>,

    /// Treat a panic inside the wrapped intent as a runtime fault.
    pub catch_panics: bool,

    /// Limits for decoding extras of intents built from payloads.
    pub parcel: ParcelLimits,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            log_tag: DEFAULT_LOG_TAG.to_string(),
            strip_prefixes: vec![READER_URL_PREFIX.to_string()],
            catch_panics: true,
            parcel: ParcelLimits::default(),
        }
    }
}

impl GuardConfig {
    /// Parse and validate a TOML document. Missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GuardConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check that the configuration can be used.
    ///
    /// # Errors
    ///
    /// Returns [`SafeIntentError::Config`] if the log tag is empty or a
    /// parcel limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.log_tag.trim().is_empty() {
            return Err(SafeIntentError::Config("log_tag must not be empty".into()));
        }
        if self.parcel.max_bytes == 0 {
            return Err(SafeIntentError::Config(
                "parcel.max_bytes must be greater than zero".into(),
            ));
        }
        if self.parcel.max_entries == 0 {
            return Err(SafeIntentError::Config(
                "parcel.max_entries must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GuardConfig::default();
        assert_eq!(config.log_tag, "SafeIntent");
        assert_eq!(config.strip_prefixes, vec!["about:reader?url=".to_string()]);
        assert!(config.catch_panics);
        assert_eq!(config.parcel.max_bytes, 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = GuardConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GuardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GuardConfig::from_toml_str(
            r#"
            log_tag = "GeckoSafeIntent"

            [parcel]
            max_bytes = 4096
        "#,
        )
        .unwrap();
        assert_eq!(config.log_tag, "GeckoSafeIntent");
        assert_eq!(config.parcel.max_bytes, 4096);
        assert_eq!(config.parcel.max_entries, 4096);
        assert_eq!(config.strip_prefixes, vec![READER_URL_PREFIX.to_string()]);
        assert!(config.catch_panics);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(GuardConfig::from_toml_str("").unwrap(), GuardConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GuardConfig::from_toml_str(r#"log_tag = "  ""#).unwrap_err();
        assert!(matches!(err, SafeIntentError::Config(_)));

        let err = GuardConfig::from_toml_str("[parcel]\nmax_entries = 0").unwrap_err();
        assert!(err.to_string().contains("max_entries"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = GuardConfig::from_toml_str("catch_panics = maybe").unwrap_err();
        assert!(matches!(err, SafeIntentError::Toml(_)));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let config = GuardConfig::from_toml_str(include_str!("../../../config/safeintent.toml")).unwrap();
        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = GuardConfig::load("/nonexistent/safeintent.toml").unwrap_err();
        assert!(matches!(err, SafeIntentError::Io(_)));
    }
}
