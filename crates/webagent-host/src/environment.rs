//! Explicit environment snapshots for the agent process.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// The complete environment handed to one agent process.
///
/// Built as inherited variables, then file overrides, then injected
/// variables. The host's own process environment is never modified.
/// Keys are case-insensitive on Windows, so `PATH` from a file replaces an
/// inherited `Path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<OsString, OsString>,
}

impl Environment {
    /// Snapshot of the current process environment.
    pub fn inherited() -> Self {
        Self {
            vars: std::env::vars_os()
                .map(|(key, value)| (normalize_key(key), value))
                .collect(),
        }
    }

    /// Apply `KEY=VALUE` pairs in order, replacing existing keys.
    pub fn overlay<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        for (key, value) in pairs {
            self.vars.insert(normalize_key(key.into()), value.into());
        }
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        self.vars.insert(normalize_key(key.into()), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.vars
            .get(&normalize_key(key.into()))
            .map(OsString::as_os_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(&normalize_key(key.into()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }
}

/// Windows variable names ignore case; fold them so overrides match.
#[cfg(windows)]
fn normalize_key(key: OsString) -> OsString {
    match key.to_str() {
        Some(s) => OsString::from(s.to_uppercase()),
        None => key,
    }
}

#[cfg(not(windows))]
fn normalize_key(key: OsString) -> OsString {
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inherited_sees_process_variables() {
        let env = Environment::inherited();
        // PATH is set in every test environment we run in
        assert!(env.contains("PATH"));
    }

    #[test]
    fn overlay_replaces_in_order() {
        let mut env = Environment::default();
        env.set("FOO", "inherited");
        env.overlay(vec![("FOO", "first"), ("BAR", "x"), ("FOO", "second")]);

        assert_eq!(env.get("FOO"), Some(OsStr::new("second")));
        assert_eq!(env.get("BAR"), Some(OsStr::new("x")));
        assert_eq!(env.iter().count(), 2);
    }

    #[test]
    fn snapshot_does_not_touch_process_env() {
        let mut env = Environment::inherited();
        env.set("WEBAGENT_SNAPSHOT_ONLY", "1");
        assert!(std::env::var_os("WEBAGENT_SNAPSHOT_ONLY").is_none());
    }

    #[test]
    fn key_case_follows_platform_rules() {
        let mut env = Environment::default();
        env.set("Path", "inherited");
        env.overlay(vec![("PATH", "from-file")]);

        if cfg!(windows) {
            assert_eq!(env.iter().count(), 1);
            assert_eq!(env.get("Path"), Some(OsStr::new("from-file")));
            assert_eq!(env.get("PATH"), Some(OsStr::new("from-file")));
        } else {
            assert_eq!(env.iter().count(), 2);
            assert_eq!(env.get("Path"), Some(OsStr::new("inherited")));
            assert_eq!(env.get("PATH"), Some(OsStr::new("from-file")));
        }
    }

    #[test]
    fn iter_is_sorted_by_key() {
        let mut env = Environment::default();
        env.set("B", "2");
        env.set("A", "1");
        let keys: Vec<_> = env.iter().map(|(k, _)| k.to_owned()).collect();
        assert_eq!(keys, vec![OsString::from("A"), OsString::from("B")]);
    }
}
