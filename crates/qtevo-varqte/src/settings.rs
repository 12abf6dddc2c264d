//! Evolution settings loaded from YAML files and the environment.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`QTEVO_` prefix, `.env` files honoured)
//! 2. Configuration file (YAML)
//! 3. Default values
//!
//! ```yaml
//! evolution:
//!   qfi_method: lin_comb_full
//!   grad_method: param_shift
//!   regularization: ridge
//! num_time_steps: 50
//! logging:
//!   level: debug
//!   format: json
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EvolutionConfig;

/// Environment variable names recognised by [`EvolutionSettings::merge_env`].
pub mod env {
    /// QFI method tag.
    pub const QFI_METHOD: &str = "QTEVO_QFI_METHOD";
    /// Gradient method tag.
    pub const GRAD_METHOD: &str = "QTEVO_GRAD_METHOD";
    /// Regularisation tag.
    pub const REGULARIZATION: &str = "QTEVO_REGULARIZATION";
    /// Default number of Euler steps.
    pub const NUM_TIME_STEPS: &str = "QTEVO_NUM_TIME_STEPS";
    /// Log level filter.
    pub const LOG_LEVEL: &str = "QTEVO_LOG_LEVEL";
    /// Log format (`console` or `json`).
    pub const LOG_FORMAT: &str = "QTEVO_LOG_FORMAT";
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(String),

    /// The settings file is not valid YAML or has the wrong shape.
    #[error("failed to parse settings: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Complete settings for an evolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSettings {
    /// Gradient/QFI/regularisation strategies.
    #[serde(default)]
    pub evolution: EvolutionConfig,

    /// Default number of explicit-Euler steps.
    #[serde(default = "default_num_time_steps")]
    pub num_time_steps: usize,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_num_time_steps() -> usize {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for EvolutionSettings {
    fn default() -> Self {
        Self {
            evolution: EvolutionConfig::default(),
            num_time_steps: default_num_time_steps(),
            logging: LoggingSettings::default(),
        }
    }
}

impl EvolutionSettings {
    /// Parse settings from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }

    /// Load with full precedence: `.env`, then the file (if any), then
    /// environment overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let settings = settings.merge_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply overrides from the process environment.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Apply overrides from `(name, value)` pairs. Unknown names are
    /// ignored; only variables that are present change anything.
    pub fn merge_vars<I, K, V>(mut self, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let value: String = value.into();
            match key.as_ref() {
                env::QFI_METHOD => self.evolution.qfi_method = value.into(),
                env::GRAD_METHOD => self.evolution.grad_method = value.into(),
                env::REGULARIZATION => self.evolution.regularization = value.into(),
                env::NUM_TIME_STEPS => {
                    self.num_time_steps = value.trim().parse().map_err(|_| {
                        ConfigError::Invalid(format!(
                            "{} must be a positive integer, got '{value}'",
                            env::NUM_TIME_STEPS
                        ))
                    })?;
                }
                env::LOG_LEVEL => self.logging.level = value,
                env::LOG_FORMAT => self.logging.format = value,
                _ => {}
            }
        }
        Ok(self)
    }

    /// Check ranges and enumerations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_time_steps == 0 {
            return Err(ConfigError::Invalid(
                "num_time_steps must be at least 1".to_string(),
            ));
        }
        match self.logging.format.as_str() {
            "console" | "json" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown log format '{other}' (expected console or json)"
                )));
            }
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level must not be empty".to_string()));
        }
        Ok(())
    }
}
