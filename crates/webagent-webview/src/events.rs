//! WebView event types.

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by the WebView, drained by the app's event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebViewEvent {
    PageLoad { state: PageLoadState, url: String },
    TitleChanged { title: String },
    /// Raw IPC body from JavaScript. Already checked to be JSON.
    IpcMessage { body: String },
    /// A navigation outside the allowlist was refused.
    NavigationBlocked { url: String },
}
