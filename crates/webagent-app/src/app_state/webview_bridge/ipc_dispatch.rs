//! IPC dispatch from the UI to the host controller.

use webagent_webview::BridgeRequest;

use crate::app_state::core::WebAgentApp;

impl WebAgentApp {
    /// Handle one raw IPC body from the WebView.
    ///
    /// Rejected messages are logged and dropped. Controller failures are
    /// already published as output events, so they are only logged here.
    pub(in crate::app_state) fn handle_ipc_message(&mut self, body: &str) {
        let request = match BridgeRequest::parse(body) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(body_len = body.len(), error = %e, "IPC message rejected");
                return;
            }
        };

        tracing::debug!(kind = request.kind(), "IPC message dispatched");

        let result = match request {
            BridgeRequest::Start => self.controller.start(),
            BridgeRequest::Stop => self.controller.stop(),
            BridgeRequest::Input(line) => self.controller.send_input(&line),
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "IPC request not applied");
        }
    }
}
