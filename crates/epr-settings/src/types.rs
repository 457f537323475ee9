//! Settings types.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Registry address used when nothing else is configured.
pub const DEFAULT_URL: &str = "http://localhost:8042";

/// Top-level client settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EprSettings {
    /// Base URL of the registry.
    pub url: String,
    /// Bearer token sent with every request, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// TCP connect timeout.
    pub connect_timeout_ms: u64,
    /// Whole-request timeout.
    pub request_timeout_ms: u64,
    /// Verbose diagnostics.
    pub debug: bool,
    /// Log output settings.
    pub logging: LoggingSettings,
}

impl Default for EprSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            token: None,
            connect_timeout_ms: 2_000,
            request_timeout_ms: 10_000,
            debug: false,
            logging: LoggingSettings::default(),
        }
    }
}

impl EprSettings {
    /// Reject values the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(SettingsError::InvalidValue("url must not be empty".into()));
        }
        if self.connect_timeout_ms == 0 {
            return Err(SettingsError::InvalidValue(
                "connectTimeoutMs must be greater than zero".into(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(SettingsError::InvalidValue(
                "requestTimeoutMs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Log level after applying the debug flag.
    pub fn effective_log_level(&self) -> &str {
        if self.debug { "debug" } else { &self.logging.level }
    }
}

/// Log output settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default level (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
