//! Window creation and WebView setup.

use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use webagent_common::{PlatformError, WebAgentError};
use webagent_webview::{WebViewConfig, WebViewManager};

use super::core::WebAgentApp;
use super::webview_bridge::bounds::window_bounds;

impl WebAgentApp {
    /// Create the window and its WebView.
    pub(super) fn initialize_window(
        &mut self,
        event_loop: &ActiveEventLoop,
    ) -> Result<(), WebAgentError> {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ))
            .with_min_inner_size(winit::dpi::LogicalSize::new(320.0, 240.0));

        let window = event_loop
            .create_window(attrs)
            .map(Arc::new)
            .map_err(|e| PlatformError::WindowError(e.to_string()))?;

        let manager = WebViewManager::default();
        let packaged = self.config.agent.mode.is_packaged();
        let config = WebViewConfig::default()
            .with_devtools(self.config.window.devtools_enabled(packaged));
        let bounds = window_bounds(window.inner_size());

        let handle = manager
            .create(window.as_ref(), bounds, config)
            .map_err(|e| WebAgentError::WebView(e.to_string()))?;
        tracing::info!(url = handle.current_url(), "WebView created");
        if let Err(e) = handle.focus() {
            tracing::debug!(error = %e, "Failed to focus webview");
        }

        self.webview = Some(handle);
        self.webviews = Some(manager);
        self.window = Some(window);
        tracing::info!("Window created");
        Ok(())
    }
}
