use wry::WebView;

use crate::ipc::{js_dispatch_message, OUTPUT_KIND};

/// Handle to the live WebView.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    /// Best-effort tracking of the loaded URL.
    pub(super) current_url: String,
}

impl WebViewHandle {
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn set_current_url(&mut self, url: String) {
        self.current_url = url;
    }

    /// Execute JavaScript in the WebView context.
    pub fn evaluate_script(&self, js: &str) -> Result<(), wry::Error> {
        self.webview.evaluate_script(js)
    }

    /// Send a typed IPC message to JavaScript.
    pub fn send_ipc(&self, kind: &str, payload: &serde_json::Value) -> Result<(), wry::Error> {
        self.evaluate_script(&js_dispatch_message(kind, payload))
    }

    /// Append already-rendered output text (see `OutputEvent::wire_text`).
    pub fn send_output(&self, text: &str) -> Result<(), wry::Error> {
        self.send_ipc(OUTPUT_KIND, &serde_json::Value::String(text.to_string()))
    }

    /// Set the WebView bounds within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }
}
