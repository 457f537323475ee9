//! # epr-logging
//!
//! Structured logging for the EPR client. Logs go to stderr so that stdout
//! carries only command results.

#![deny(unsafe_code)]

use std::str::FromStr;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Logging configuration.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Default log level. Overridden by `RUST_LOG`.
    pub level: Level,
    /// Per-module level overrides (e.g. `"epr_client"` => DEBUG).
    pub module_levels: Vec<(String, Level)>,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            module_levels: Vec::new(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Build a config from a level name, falling back to `info` when the
    /// name is not a known level.
    pub fn from_level_name(level: &str, json: bool) -> Self {
        Self {
            level: Level::from_str(level).unwrap_or(Level::INFO),
            json,
            ..Self::default()
        }
    }

    /// Filter directives for [`EnvFilter`], e.g. `info,epr_client=debug`.
    pub fn directives(&self) -> String {
        let mut filter = self.level.to_string().to_lowercase();
        for (module, level) in &self.module_levels {
            filter.push_str(&format!(",{}={}", module, level.to_string().to_lowercase()));
        }
        filter
    }
}

/// Logging could not be initialized.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()));

    let json_layer = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives() {
        assert_eq!(LoggingConfig::default().directives(), "info");
    }

    #[test]
    fn module_levels_appended() {
        let config = LoggingConfig {
            level: Level::WARN,
            module_levels: vec![
                ("epr_client".into(), Level::DEBUG),
                ("reqwest".into(), Level::ERROR),
            ],
            json: false,
        };
        assert_eq!(config.directives(), "warn,epr_client=debug,reqwest=error");
    }

    #[test]
    fn from_level_name_parses_known_levels() {
        let config = LoggingConfig::from_level_name("debug", true);
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.json);
    }

    #[test]
    fn from_level_name_falls_back_to_info() {
        let config = LoggingConfig::from_level_name("chatty", false);
        assert_eq!(config.level, Level::INFO);
    }

    #[test]
    fn second_init_fails() {
        let config = LoggingConfig::default();
        // Another test in this binary may have installed a subscriber first.
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
