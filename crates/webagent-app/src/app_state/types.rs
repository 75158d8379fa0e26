//! Internal constants for the app state module.

use std::time::Duration;

/// How often to poll the agent and WebView (approx 120 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// How long shutdown waits for a signalled agent to exit before the
/// runtime is dropped (which kills it).
pub(super) const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);
