//! Periodic polling of the agent and WebView.

use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::WebAgentApp;
use super::types::POLL_INTERVAL;

impl WebAgentApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            // WebView first: a page that just finished loading gets the
            // replay before any newer output.
            self.poll_webview_events();
            self.poll_agent_output();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }
}
