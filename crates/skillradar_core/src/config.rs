//! Core runtime configuration.
//!
//! # Responsibility
//! - Hold host-supplied settings for logging and import leniency.
//! - Parse settings from JSON with every field defaulted.
//!
//! # Invariants
//! - A config returned by `from_json_str` has passed `validate()`.

use crate::logging::{default_log_level, normalize_level};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// How imports treat score data that violates model invariants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPolicy {
    /// Clamp out-of-range scores and drop orphaned score keys.
    #[default]
    Repair,
    /// Reject the document on any out-of-range or orphaned score.
    Strict,
}

/// Settings supplied by the hosting presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` disables file logs.
    pub log_dir: Option<PathBuf>,
    pub import_policy: ImportPolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            import_policy: ImportPolicy::default(),
        }
    }
}

/// Configuration parse/validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid config: {message}"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(path) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

impl CoreConfig {
    /// Parses and validates a JSON config object.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(input).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.log_level)
            .map_err(|err| ConfigError::InvalidLogLevel(err.to_string()))?;
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ImportPolicy};

    #[test]
    fn empty_object_yields_defaults() {
        let config = CoreConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.import_policy, ImportPolicy::Repair);
    }

    #[test]
    fn parses_strict_policy_and_level() {
        let config =
            CoreConfig::from_json_str(r#"{ "log_level": "WARN", "import_policy": "strict" }"#)
                .unwrap();
        assert_eq!(config.import_policy, ImportPolicy::Strict);
        assert_eq!(config.log_level, "WARN");
    }

    #[test]
    fn rejects_unknown_level_and_relative_dir() {
        let err = CoreConfig::from_json_str(r#"{ "log_level": "loud" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));

        let err = CoreConfig::from_json_str(r#"{ "log_dir": "logs/dev" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::RelativeLogDir(_)));

        let err = CoreConfig::from_json_str(r#"{ "import_policy": "maybe" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
