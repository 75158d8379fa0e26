//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Level name as understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Mirror agent stdout/stderr chunks into the log (at debug/warn).
    pub mirror_agent_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            mirror_agent_output: true,
        }
    }
}

impl LoggingConfig {
    /// `EnvFilter` directive scoped to this workspace's crates.
    pub fn directive(&self) -> String {
        format!("webagent={}", self.level.as_filter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert!(config.mirror_agent_output);
        assert_eq!(config.directive(), "webagent=info");
    }

    #[test]
    fn warning_maps_to_warn_filter() {
        let config: LoggingConfig = toml::from_str("level = \"WARNING\"").unwrap();
        assert_eq!(config.level, LogLevel::Warning);
        assert_eq!(config.directive(), "webagent=warn");
    }
}
