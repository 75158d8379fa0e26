//! Core TOML config loading: read from path or platform default.

use crate::schema::WebAgentConfig;
use crate::validation;
use std::path::Path;
use tracing::{info, warn};
use webagent_common::ConfigError;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. If validation fails, a warning
/// is logged and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<WebAgentConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: WebAgentConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e} — using parsed config as-is");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/webagent/config.toml`
/// On Linux: `~/.config/webagent/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<WebAgentConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(WebAgentConfig::default())
        }
        Err(e) => Err(e),
    }
}
