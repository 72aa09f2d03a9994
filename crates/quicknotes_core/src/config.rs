//! Runtime configuration.
//!
//! # Responsibility
//! - Hold the fixed storage key, feedback endpoint and logging level.
//! - Parse an optional JSON configuration document with per-field defaults.
//!
//! # Invariants
//! - `QuickNotesConfig::default()` always passes `validate()`.
//! - No environment variables are consulted.

use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Storage key the note list is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "notesApp.notes.v1";
/// Feedback endpoint used when none is configured.
pub const DEFAULT_FEEDBACK_ENDPOINT: &str = "https://your-serverless-api-url/feedback";

/// Core configuration shared by the note store and feedback submitter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct QuickNotesConfig {
    pub storage_key: String,
    pub feedback_endpoint: String,
    /// Request timeout for feedback submission; `None` waits indefinitely.
    pub feedback_timeout_ms: Option<u64>,
    pub log_level: String,
}

impl Default for QuickNotesConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            feedback_endpoint: DEFAULT_FEEDBACK_ENDPOINT.to_string(),
            feedback_timeout_ms: None,
            log_level: default_log_level().to_string(),
        }
    }
}

/// Invalid configuration document or value.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    EmptyStorageKey,
    InvalidEndpoint(String),
    ZeroTimeout,
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config document: {err}"),
            Self::EmptyStorageKey => write!(f, "storage_key cannot be empty"),
            Self::InvalidEndpoint(value) => {
                write!(f, "feedback_endpoint must be an http(s) URL, got `{value}`")
            }
            Self::ZeroTimeout => write!(f, "feedback_timeout_ms must be greater than zero"),
            Self::InvalidLogLevel(value) => write!(f, "unsupported log_level `{value}`"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl QuickNotesConfig {
    /// Parses and validates a JSON config; missing fields take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        let endpoint = self.feedback_endpoint.trim();
        let has_host = endpoint
            .strip_prefix("https://")
            .or_else(|| endpoint.strip_prefix("http://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ConfigError::InvalidEndpoint(self.feedback_endpoint.clone()));
        }
        if self.feedback_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        normalize_level(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))?;
        Ok(())
    }

    pub fn feedback_timeout(&self) -> Option<Duration> {
        self.feedback_timeout_ms.map(Duration::from_millis)
    }
}
