//! # epr-settings
//!
//! Configuration for the EPR client, loaded from three layers (in priority
//! order):
//! 1. **Compiled defaults**: [`EprSettings::default()`]
//! 2. **Settings file**: `~/.epr/settings.json`, or the path in
//!    `EPR_SETTINGS` (deep-merged over defaults)
//! 3. **Environment variables**: `EPR_*` overrides (highest priority)
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Usage
//!
//! ```no_run
//! let settings = epr_settings::load_settings().unwrap_or_default();
//! println!("registry: {}", settings.url);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{DEFAULT_URL, EprSettings, LoggingSettings};
