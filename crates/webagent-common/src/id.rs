use serde::{Deserialize, Serialize};
use std::fmt;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Identifies one agent process from spawn to exit.
///
/// Shows up in log fields so interleaved runs can be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    pub fn new() -> Self {
        Self(new_id())
    }

    /// First eight hex digits, enough to tell runs apart in logs.
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_id_is_valid_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }

    #[test]
    fn run_id_short_is_hex_prefix() {
        let rid = RunId::new();
        assert_eq!(rid.short().len(), 8);
        assert!(rid.short().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(rid.to_string().starts_with(rid.short()));
    }

    #[test]
    fn run_id_display_is_full_uuid() {
        let rid = RunId::new();
        assert!(uuid::Uuid::parse_str(&rid.to_string()).is_ok());
    }

    #[test]
    fn run_id_serialization() {
        let rid = RunId::new();
        let json = serde_json::to_string(&rid).unwrap();
        let deserialized: RunId = serde_json::from_str(&json).unwrap();
        assert_eq!(rid, deserialized);
    }
}
