//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Main window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Static window title.
    pub title: String,
    /// Initial logical width in pixels.
    pub width: u32,
    /// Initial logical height in pixels.
    pub height: u32,
    /// Force webview dev tools on or off. `None` enables them in unpackaged mode only.
    pub devtools: Option<bool>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "WebAgent".into(),
            width: 1200,
            height: 800,
            devtools: None,
        }
    }
}

impl WindowConfig {
    pub fn devtools_enabled(&self, packaged: bool) -> bool {
        self.devtools.unwrap_or(!packaged)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_config_defaults() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "WebAgent");
        assert_eq!(config.width, 1200);
        assert_eq!(config.height, 800);
        assert!(config.devtools.is_none());
    }

    #[test]
    fn devtools_follow_packaging_unless_forced() {
        let mut config = WindowConfig::default();
        assert!(config.devtools_enabled(false));
        assert!(!config.devtools_enabled(true));

        config.devtools = Some(true);
        assert!(config.devtools_enabled(true));
    }

    #[test]
    fn window_config_partial_toml() {
        let toml_str = r#"
title = "Agent Console"
width = 900
"#;
        let config: WindowConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.title, "Agent Console");
        assert_eq!(config.width, 900);
        assert_eq!(config.height, 800); // default
    }
}
