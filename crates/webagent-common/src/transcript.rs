//! Append-only record of everything sent to the output region.

use crate::events::OutputEvent;

/// The accumulated output text of one UI session.
///
/// Text is only ever appended; nothing is rewritten or truncated while
/// the session lasts.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    text: String,
    chunks: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event's wire text and return the appended slice.
    pub fn append(&mut self, event: &OutputEvent) -> &str {
        let start = self.text.len();
        self.text.push_str(&event.wire_text());
        self.chunks += 1;
        &self.text[start..]
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.text.ends_with(suffix)
    }

    /// Number of chunks appended so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_arrival_order() {
        let mut t = Transcript::new();
        t.append(&OutputEvent::info("Starting WebAgent...\n"));
        t.append(&OutputEvent::output("ready\n"));
        t.append(&OutputEvent::error("warn\n"));

        assert_eq!(
            t.as_str(),
            "[INFO] Starting WebAgent...\nready\n[ERROR] warn\n"
        );
        assert_eq!(t.chunk_count(), 3);
    }

    #[test]
    fn append_returns_only_new_text() {
        let mut t = Transcript::new();
        t.append(&OutputEvent::output("a"));
        assert_eq!(t.append(&OutputEvent::error("b")), "[ERROR] b");
        assert!(t.ends_with("a[ERROR] b"));
    }

    #[test]
    fn new_transcript_is_empty() {
        let t = Transcript::new();
        assert!(t.is_empty());
        assert_eq!(t.chunk_count(), 0);
    }
}
