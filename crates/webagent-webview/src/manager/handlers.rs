use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WebViewEvent};

use super::WebViewManager;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// URL prefixes the WebView may navigate to. Everything else is blocked.
pub const ALLOWED_NAV_PREFIXES: &[&str] = &[
    "webagent://",
    // WebView2 rewrites custom protocols: webagent://localhost/… → http://webagent.localhost/…
    "http://webagent.localhost/",
    "about:blank",
];

/// Check whether a URL is allowed by the navigation allowlist.
pub fn is_navigation_allowed(url: &str) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

type EventSink = Arc<Mutex<Vec<WebViewEvent>>>;

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(body_len = body.len(), "IPC message rejected: invalid JSON");
                return;
            }

            debug!(body_len = body.len(), "IPC message from JS");
            Self::push_event(&events, WebViewEvent::IpcMessage { body });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(?state, url = %url, "page load");
            Self::push_event(&events, WebViewEvent::PageLoad { state, url });
        })
    }

    pub(super) fn attach_title_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
    ) -> WebViewBuilder<'a> {
        builder.with_document_title_changed_handler(move |title| {
            debug!(title = %title, "title changed");
            Self::push_event(&events, WebViewEvent::TitleChanged { title });
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: EventSink,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if is_navigation_allowed(&url) {
                return true;
            }
            warn!(url = %url, "navigation blocked: URL not in allowlist");
            Self::push_event(&events, WebViewEvent::NavigationBlocked { url });
            false
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
