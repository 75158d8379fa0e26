use crate::content::{ENTRY_URL, SCHEME};

/// Configuration for creating the WebView.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebViewConfig {
    /// Initial URL. Defaults to the bundled UI.
    pub url: String,
    /// Whether to enable dev tools.
    pub devtools: bool,
    pub user_agent: Option<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: ENTRY_URL.to_string(),
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("WebAgent/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl WebViewConfig {
    pub fn with_devtools(mut self, devtools: bool) -> Self {
        self.devtools = devtools;
        self
    }

    /// Whether the initial URL is served by the bundled content protocol.
    pub fn is_bundled(&self) -> bool {
        self.url.starts_with(&format!("{SCHEME}://"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_loads_bundled_ui() {
        let config = WebViewConfig::default();
        assert_eq!(config.url, "webagent://localhost/index.html");
        assert!(config.is_bundled());
        assert!(config
            .user_agent
            .as_deref()
            .is_some_and(|ua| ua.starts_with("WebAgent/")));
    }

    #[test]
    fn with_devtools_overrides_build_default() {
        assert!(WebViewConfig::default().with_devtools(true).devtools);
        assert!(!WebViewConfig::default().with_devtools(false).devtools);
    }
}
