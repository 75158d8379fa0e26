//! WebView event polling.

use webagent_webview::{PageLoadState, WebViewEvent};

use crate::app_state::core::WebAgentApp;

impl WebAgentApp {
    /// Drain and handle events produced by the WebView's handlers.
    pub(in crate::app_state) fn poll_webview_events(&mut self) {
        let events = match &self.webviews {
            Some(manager) => manager.drain_events(),
            None => return,
        };
        for event in events {
            self.handle_webview_event(event);
        }
    }

    pub(in crate::app_state) fn handle_webview_event(&mut self, event: WebViewEvent) {
        match event {
            WebViewEvent::PageLoad { state, url } => {
                if let Some(ref mut handle) = self.webview {
                    handle.set_current_url(url.clone());
                }
                match state {
                    PageLoadState::Started => self.page_loaded = false,
                    PageLoadState::Finished => {
                        tracing::info!(url = %url, "UI loaded");
                        self.page_loaded = true;
                        self.replay_transcript();
                    }
                }
            }
            WebViewEvent::IpcMessage { body } => self.handle_ipc_message(&body),
            WebViewEvent::TitleChanged { title } => {
                tracing::debug!(title = %title, "UI title changed");
            }
            WebViewEvent::NavigationBlocked { url } => {
                tracing::debug!(url = %url, "UI navigation blocked");
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use webagent_webview::{PageLoadState, WebViewEvent};

    use crate::app_state::core::test_support::headless_app;

    #[test]
    fn page_load_tracks_readiness() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = headless_app(dir.path());
        assert!(!app.page_loaded);

        app.handle_webview_event(WebViewEvent::PageLoad {
            state: PageLoadState::Finished,
            url: "webagent://localhost/index.html".into(),
        });
        assert!(app.page_loaded);

        app.handle_webview_event(WebViewEvent::PageLoad {
            state: PageLoadState::Started,
            url: "webagent://localhost/index.html".into(),
        });
        assert!(!app.page_loaded);
    }

    #[test]
    fn output_before_load_is_kept_for_replay() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = headless_app(dir.path());

        app.handle_webview_event(WebViewEvent::IpcMessage {
            body: r#"{"kind":"input","payload":"early"}"#.into(),
        });
        app.poll_agent_output();
        assert!(app.transcript.as_str().contains("not running"));

        // No webview in tests: replay must be a harmless no-op.
        app.handle_webview_event(WebViewEvent::PageLoad {
            state: PageLoadState::Finished,
            url: "webagent://localhost/index.html".into(),
        });
        assert_eq!(app.transcript.chunk_count(), 1);
    }
}
