use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::http::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use wry::http::{Response, StatusCode};
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::{request_path, ContentProvider, SCHEME};
use crate::ipc::IPC_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create the WebView as a child of `window`, positioned at `bounds`.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_clipboard(true)
            .with_focused(true)
            .with_initialization_script(IPC_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&self.events));
        builder = Self::attach_page_load_handler(builder, Arc::clone(&self.events));
        builder = Self::attach_title_handler(builder, Arc::clone(&self.events));
        builder = Self::attach_navigation_handler(builder, Arc::clone(&self.events));
        builder = self.attach_custom_protocol(builder);

        let webview = builder.with_url(&config.url).build_as_child(window)?;

        debug!(url = %config.url, bundled = config.is_bundled(), "WebView created");

        Ok(WebViewHandle {
            webview,
            current_url: config.url,
        })
    }

    fn attach_custom_protocol<'a>(&self, builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        let cp = Arc::clone(&self.content_provider);
        builder.with_custom_protocol(SCHEME.to_string(), move |_wv_id, request| {
            let uri = request.uri().to_string();
            serve(&cp, request_path(&uri))
        })
    }
}

/// Build the custom-protocol response for `path`.
fn serve(cp: &ContentProvider, path: &str) -> Response<Cow<'static, [u8]>> {
    match cp.resolve(path) {
        Some((mime, data)) => {
            let mut response = Response::new(data);
            let headers = response.headers_mut();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(mime));
            headers.insert(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("webagent://localhost"),
            );
            response
        }
        None => {
            warn!(path = %path, "custom protocol: asset not found");
            let mut response = Response::new(Cow::Borrowed(b"Not Found".as_slice()));
            *response.status_mut() = StatusCode::NOT_FOUND;
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_bundled_index() {
        let cp = ContentProvider::bundled();
        let response = serve(&cp, "/index.html");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
        assert!(!response.body().is_empty());
    }

    #[test]
    fn missing_asset_is_404() {
        let cp = ContentProvider::bundled();
        let response = serve(&cp, "/nope.js");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
