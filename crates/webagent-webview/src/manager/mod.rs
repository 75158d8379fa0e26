//! WebView lifecycle management.
//!
//! `WebViewManager` builds the window's single `wry::WebView` and collects
//! the events its handlers produce until the event loop drains them.

use std::sync::{Arc, Mutex};

use crate::content::ContentProvider;
use crate::events::WebViewEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use types::WebViewConfig;

/// Owns the event sink shared with the WebView's handlers.
pub struct WebViewManager {
    /// Handlers push here; the main event loop drains.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    content_provider: Arc<ContentProvider>,
}

impl WebViewManager {
    pub fn new(content_provider: ContentProvider) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            content_provider: Arc::new(content_provider),
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub(crate) fn push_event(events: &Mutex<Vec<WebViewEvent>>, event: WebViewEvent) {
        if let Ok(mut evts) = events.lock() {
            evts.push(event);
        }
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new(ContentProvider::bundled())
    }
}
