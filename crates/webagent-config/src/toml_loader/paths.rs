//! Config path resolution and default file creation.

use std::path::{Path, PathBuf};
use tracing::info;
use webagent_common::ConfigError;

use super::template::default_config_toml;

pub(crate) const APP_NAME: &str = "webagent";

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join(APP_NAME).join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}
