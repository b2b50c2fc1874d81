//! Flat KEY=VALUE configuration format.
//!
//! The persisted record is a plain env file: one assignment per line,
//! `#` comments and blank lines tolerated on read, order preserved on
//! render. Values are stored verbatim — no quoting or escape syntax.

use std::path::Path;

use crate::error::Result;
use crate::io;

/// Parse env-file content into ordered (key, value) pairs.
/// Comments and blank lines are skipped; lines without `=` are ignored.
pub fn parse(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| {
            l.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        })
        .collect()
}

/// Render (key, value) pairs as env-file content, one assignment per line.
pub fn render(pairs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in pairs {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Look up a key in parsed pairs.
pub fn get<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn load(path: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse(&content))
}

/// Write pairs to `path` atomically.
pub fn save(path: &Path, pairs: &[(String, String)]) -> Result<()> {
    io::atomic_write(path, render(pairs).as_bytes())
}
