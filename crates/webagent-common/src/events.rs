use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Marker prepended to error chunks before they reach the UI.
pub const ERROR_PREFIX: &str = "[ERROR] ";

/// Marker prepended to informational host messages.
pub const INFO_PREFIX: &str = "[INFO] ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLevel {
    /// A chunk read from the agent's stdout.
    Output,
    /// A host status message (starting, stopping, already running).
    Info,
    /// A chunk read from the agent's stderr, or a host failure.
    Error,
    /// The agent process has exited.
    Exit,
}

/// One chunk of text bound for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEvent {
    pub level: OutputLevel,
    pub text: String,
}

impl OutputEvent {
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            level: OutputLevel::Output,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: OutputLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: OutputLevel::Error,
            text: text.into(),
        }
    }

    pub fn exit(text: impl Into<String>) -> Self {
        Self {
            level: OutputLevel::Exit,
            text: text.into(),
        }
    }

    /// The text exactly as transmitted over the bridge's `output` channel.
    pub fn wire_text(&self) -> String {
        match self.level {
            OutputLevel::Output | OutputLevel::Exit => self.text.clone(),
            OutputLevel::Info => format!("{INFO_PREFIX}{}", self.text),
            OutputLevel::Error => format!("{ERROR_PREFIX}{}", self.text),
        }
    }
}

/// Fan-out of output events to every live subscriber.
///
/// Each subscriber gets its own unbounded queue, so a slow reader never
/// drops chunks and every subscriber sees events in publish order.
/// Subscribers whose receiver was dropped are pruned on the next publish.
pub struct OutputBus {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<OutputEvent>>>,
}

impl OutputBus {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<OutputEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    /// Deliver an event to all subscribers. Returns how many received it.
    pub fn publish(&self, event: OutputEvent) -> usize {
        let Ok(mut subs) = self.subscribers.lock() else {
            return 0;
        };
        let before = subs.len();
        subs.retain(|tx| tx.send(event.clone()).is_ok());
        if subs.len() < before {
            tracing::debug!(pruned = before - subs.len(), "dropped closed output subscribers");
        }
        subs.len()
    }
}

impl Default for OutputBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_text_prefixes_errors_only_with_error_marker() {
        assert_eq!(OutputEvent::output("ready\n").wire_text(), "ready\n");
        assert_eq!(
            OutputEvent::error("Traceback\n").wire_text(),
            "[ERROR] Traceback\n"
        );
        assert_eq!(
            OutputEvent::info("Starting WebAgent...\n").wire_text(),
            "[INFO] Starting WebAgent...\n"
        );
        assert_eq!(
            OutputEvent::exit("\n[WebAgent exited with code 0]\n").wire_text(),
            "\n[WebAgent exited with code 0]\n"
        );
    }

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = OutputBus::new();
        let mut rx = bus.subscribe();

        bus.publish(OutputEvent::output("hello"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event, OutputEvent::output("hello"));
    }

    #[tokio::test]
    async fn multiple_subscribers_see_same_order() {
        let bus = OutputBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(OutputEvent::info("one"));
        bus.publish(OutputEvent::error("two"));

        for rx in [&mut rx1, &mut rx2] {
            assert_eq!(rx.recv().await.unwrap().text, "one");
            assert_eq!(rx.recv().await.unwrap().text, "two");
        }
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = OutputBus::new();
        assert_eq!(bus.publish(OutputEvent::output("x")), 0);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let bus = OutputBus::new();
        let _keep = bus.subscribe();
        let dropped = bus.subscribe();
        drop(dropped);

        assert_eq!(bus.publish(OutputEvent::output("x")), 1);
        assert_eq!(bus.publish(OutputEvent::output("y")), 1);
    }

    #[test]
    fn nothing_is_dropped_without_a_reader() {
        let bus = OutputBus::new();
        let mut rx = bus.subscribe();
        for i in 0..5_000 {
            bus.publish(OutputEvent::output(i.to_string()));
        }
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 5_000);
    }

    #[test]
    fn output_level_serializes_lowercase() {
        let json = serde_json::to_string(&OutputLevel::Exit).unwrap();
        assert_eq!(json, "\"exit\"");
    }
}
