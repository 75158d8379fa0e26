//! Graceful shutdown: signal the agent, drop the WebView, stop the runtime.

use std::time::Duration;

use super::core::WebAgentApp;
use super::types::SHUTDOWN_GRACE;

impl WebAgentApp {
    /// Shut down all subsystems. Safe to call more than once.
    ///
    /// Order matters:
    /// 1. Signal the agent (same termination as a stop request)
    /// 2. Give it `SHUTDOWN_GRACE` to exit while the runtime still runs
    /// 3. Drop the WebView
    /// 4. Shut down the runtime (kills an agent that is still alive)
    pub(crate) fn shutdown(&mut self) {
        let Some(runtime) = self.tokio_runtime.take() else {
            return;
        };
        tracing::info!("Initiating graceful shutdown");
        self.should_exit = true;

        self.controller.shutdown();
        let controller = &mut self.controller;
        let drained = runtime.block_on(async {
            tokio::time::timeout(SHUTDOWN_GRACE, async {
                while controller.pump().await {}
            })
            .await
        });
        if drained.is_err() {
            tracing::warn!(
                grace_secs = SHUTDOWN_GRACE.as_secs(),
                "Agent did not exit in time, killing it"
            );
        }

        self.page_loaded = false;
        self.webview = None;
        self.webviews = None;

        runtime.shutdown_timeout(Duration::from_secs(1));

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(all(test, unix))]
mod tests {
    use std::time::{Duration, Instant};

    use webagent_host::ControllerState;

    use crate::app_state::core::test_support::{headless_app, write_agent_script};

    #[test]
    fn shutdown_on_fresh_app_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = headless_app(dir.path());

        app.shutdown();

        assert!(app.should_exit);
        assert!(app.tokio_runtime.is_none());
        assert!(app.webview.is_none());
        assert_eq!(app.controller.state(), ControllerState::Idle);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = headless_app(dir.path());

        app.shutdown();
        app.shutdown();

        assert!(app.tokio_runtime.is_none());
    }

    #[test]
    fn shutdown_terminates_running_agent() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("terminated");
        write_agent_script(
            dir.path(),
            &format!(
                "trap 'touch \"{}\"; exit 0' TERM\nwhile :; do sleep 0.05; done\n",
                marker.display()
            ),
        );
        let mut app = headless_app(dir.path());

        app.handle_ipc_message(r#"{"kind":"start"}"#);
        assert_eq!(app.controller.state(), ControllerState::Running);

        let started = Instant::now();
        app.shutdown();

        assert_eq!(app.controller.state(), ControllerState::Idle);
        assert!(marker.exists(), "agent did not receive SIGTERM");
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
