//! Configuration schema types for the WebAgent shell.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod agent;
mod system;
mod window;

pub use agent::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct WebAgentConfig {
    pub agent: AgentConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: WebAgentConfig = toml::from_str("").unwrap();
        assert_eq!(config.agent.display_name, "WebAgent");
        assert_eq!(config.window.title, "WebAgent");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn sections_parse_independently() {
        let toml_str = r#"
[agent]
mode = "packaged"
resources_dir = "/opt/webagent/resources"

[logging]
level = "DEBUG"
"#;
        let config: WebAgentConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.mode, LaunchMode::Packaged);
        assert_eq!(
            config.agent.resources_dir.as_deref(),
            Some("/opt/webagent/resources")
        );
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.window.height, 800);
    }

    #[test]
    fn unknown_sections_are_ignored() {
        let config: WebAgentConfig = toml::from_str("[theme]\nname = \"x\"\n").unwrap();
        assert_eq!(config.agent.interpreter, "python3");
    }
}
