//! Agent output polling: controller reports → transcript → UI.

use crate::app_state::core::WebAgentApp;

impl WebAgentApp {
    /// Drain controller reports and forward published output to the UI.
    ///
    /// Every event lands in the transcript; it is sent to the WebView only
    /// once the page has loaded (earlier text is replayed on load).
    pub(in crate::app_state) fn poll_agent_output(&mut self) {
        self.controller.poll();

        while let Ok(event) = self.output_rx.try_recv() {
            let text = self.transcript.append(&event);
            if !self.page_loaded {
                continue;
            }
            if let Some(ref handle) = self.webview {
                if let Err(e) = handle.send_output(text) {
                    tracing::warn!(error = %e, "Failed to send output to webview");
                }
            }
        }
    }

    /// Send the whole transcript to a freshly loaded page.
    pub(in crate::app_state) fn replay_transcript(&self) {
        if self.transcript.is_empty() {
            return;
        }
        if let Some(ref handle) = self.webview {
            tracing::debug!(
                chunks = self.transcript.chunk_count(),
                "Replaying transcript into webview"
            );
            if let Err(e) = handle.send_output(self.transcript.as_str()) {
                tracing::warn!(error = %e, "Failed to replay transcript");
            }
        }
    }
}
