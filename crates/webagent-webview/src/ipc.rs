//! Bridge protocol between the host and the bundled UI.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: the UI calls `window.webagent.start()` etc., which posts
//!   `{"kind": ..., "payload": ...}` to the `ipc_handler` of the WebView.
//!   Only the kinds in [`ALLOWED_IPC_KINDS`] are accepted.
//! - **Rust -> JS**: the host evaluates `window.webagent._dispatch(...)` with
//!   the single outbound kind, [`OUTPUT_KIND`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kinds the UI may send. Everything else is dropped.
pub const ALLOWED_IPC_KINDS: &[&str] = &["start", "stop", "input"];

/// The only kind the host sends to the UI.
pub const OUTPUT_KIND: &str = "output";

/// Raw IPC envelope as posted by JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    pub kind: String,
    #[serde(default)]
    pub payload: IpcPayload,
}

/// Payload of an IPC message: a string, structured JSON, or nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(serde_json::Value),
    #[default]
    None,
}

impl IpcPayload {
    fn as_text(&self) -> Option<&str> {
        match self {
            IpcPayload::Text(s) => Some(s),
            IpcPayload::Json(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl IpcMessage {
    /// Parse an IPC envelope from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw).map_err(|e| BridgeError::InvalidJson(e.to_string()))
    }
}

/// Why an inbound message was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("invalid IPC JSON: {0}")]
    InvalidJson(String),

    #[error("IPC kind not allowed: {0}")]
    KindNotAllowed(String),

    #[error("IPC kind '{0}' requires a text payload")]
    MissingText(&'static str),
}

/// Check whether an inbound IPC kind is on the allowlist.
pub fn is_ipc_kind_allowed(kind: &str) -> bool {
    ALLOWED_IPC_KINDS.contains(&kind)
}

// =============================================================================
// TYPED REQUESTS
// =============================================================================

/// A validated request from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeRequest {
    Start,
    Stop,
    /// One line of user input, without a trailing newline.
    Input(String),
}

impl BridgeRequest {
    /// Parse and validate a raw IPC body.
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        Self::try_from(IpcMessage::from_json(raw)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BridgeRequest::Start => "start",
            BridgeRequest::Stop => "stop",
            BridgeRequest::Input(_) => "input",
        }
    }
}

impl TryFrom<IpcMessage> for BridgeRequest {
    type Error = BridgeError;

    fn try_from(msg: IpcMessage) -> Result<Self, Self::Error> {
        match msg.kind.as_str() {
            "start" => Ok(BridgeRequest::Start),
            "stop" => Ok(BridgeRequest::Stop),
            "input" => msg
                .payload
                .as_text()
                .map(|line| BridgeRequest::Input(line.to_string()))
                .ok_or(BridgeError::MissingText("input")),
            _ => Err(BridgeError::KindNotAllowed(msg.kind)),
        }
    }
}

// =============================================================================
// JS SIDE
// =============================================================================

/// Injected into the WebView before any page script runs.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    var handlers = {};
    function send(kind, payload) {
        window.ipc.postMessage(JSON.stringify({
            kind: kind,
            payload: payload === undefined ? null : payload
        }));
    }
    window.webagent = {
        start: function() { send('start'); },
        stop: function() { send('stop'); },
        sendInput: function(line) { send('input', String(line)); },
        on: function(kind, callback) { handlers[kind] = callback; },
        _dispatch: function(kind, payload) {
            var handler = handlers[kind];
            if (handler) {
                handler(payload);
            }
        }
    };
})();
"#;

/// Generate a JS snippet that dispatches a message to the UI's handler.
pub fn js_dispatch_message(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.webagent._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}
