//! Bundled UI served over the `webagent://` custom protocol.
//!
//! The UI is compiled into the binary, so the WebView never touches the
//! filesystem and no local HTTP server is needed.

use std::borrow::Cow;
use std::collections::HashMap;

/// Custom protocol scheme registered on the WebView.
pub const SCHEME: &str = "webagent";

/// Page loaded at startup.
pub const ENTRY_URL: &str = "webagent://localhost/index.html";

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// In-memory asset table keyed by request path.
#[derive(Debug, Clone, Default)]
pub struct ContentProvider {
    assets: HashMap<String, (&'static str, Cow<'static, [u8]>)>, // path -> (mime, data)
}

impl ContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider holding the bundled WebAgent UI.
    pub fn bundled() -> Self {
        let mut provider = Self::new();
        provider.add_asset("index.html", INDEX_HTML.as_bytes());
        provider
    }

    /// Register an asset. The MIME type is guessed from the path.
    pub fn add_asset(&mut self, path: impl Into<String>, data: impl Into<Cow<'static, [u8]>>) {
        let path = path.into();
        let mime = mime_from_extension(&path);
        self.assets.insert(path, (mime, data.into()));
    }

    /// Resolve a request path (leading slashes ignored, `/` = index) to
    /// MIME type and content.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, Cow<'static, [u8]>)> {
        let clean = path.split(['?', '#']).next().unwrap_or("");
        let clean = clean.trim_start_matches('/');
        let clean = if clean.is_empty() { "index.html" } else { clean };
        self.assets
            .get(clean)
            .map(|(mime, data)| (*mime, data.clone()))
    }
}

/// Extract the asset path from a custom-protocol URI.
///
/// Handles `webagent://localhost/...` and WebView2's rewritten
/// `http://webagent.localhost/...` form.
pub fn request_path(uri: &str) -> &str {
    let prefixes = [
        "webagent://localhost",
        "http://webagent.localhost",
        "https://webagent.localhost",
        "webagent://",
    ];
    prefixes
        .iter()
        .find_map(|p| uri.strip_prefix(p))
        .unwrap_or("")
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
