//! `.env` file parsing: one `KEY=VALUE` pair per line.

use std::path::Path;

/// Parse `KEY=VALUE` lines.
///
/// The first `=` splits key from value; both sides are trimmed. Lines
/// without `=`, with an empty key or value, or starting with `#` are
/// skipped. Later duplicates win when the pairs are applied in order.
pub fn parse_env_file(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Read and parse an env file. A missing file yields `Ok(None)`.
pub fn load_env_file(path: &Path) -> std::io::Result<Option<Vec<(String, String)>>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(parse_env_file(&content))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
