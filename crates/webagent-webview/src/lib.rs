//! WebView surface for the WebAgent window.
//!
//! Wraps `wry` to provide:
//! - A single child WebView filling the host window
//! - The bridge protocol (closed set of IPC kinds, Rust <-> JavaScript)
//! - A `webagent://` custom protocol serving the bundled UI
//! - A navigation allowlist restricted to bundled content

pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;

pub use content::ContentProvider;
pub use events::{PageLoadState, WebViewEvent};
pub use ipc::{BridgeError, BridgeRequest, IpcMessage, IpcPayload};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
