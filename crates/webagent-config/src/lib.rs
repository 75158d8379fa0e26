//! WebAgent shell configuration.
//!
//! TOML-based configuration for how the agent is launched, how the window
//! looks, and how verbose logging is. All sections use serde defaults so
//! partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use webagent_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{WebAgentConfig, CONFIG_SCHEMA_VERSION};

use webagent_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a commented default file if none exists yet.
pub fn load_config() -> Result<WebAgentConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &WebAgentConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
