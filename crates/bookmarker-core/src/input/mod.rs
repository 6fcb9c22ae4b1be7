//! URL list input: one `Folder[,Subfolder...]|URL` or bare `URL` per line.
//!
//! Blank lines and `#` comments are skipped. Folder names are trimmed and
//! empty names dropped, so `Dev, ,Rust|https://...` nests under `Dev/Rust`.

mod parse;

pub use parse::{parse_line, InputError};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 1-based line number in the source file.
    pub line: usize,
    /// Folder path from outermost to innermost; empty for root bookmarks.
    pub folders: Vec<String>,
    pub url: String,
}

/// Separators used to split a line into folder path and URL.
#[derive(Debug, Clone)]
pub struct Separators {
    pub folder: String,
    pub subfolder: String,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            folder: "|".to_string(),
            subfolder: ",".to_string(),
        }
    }
}

/// Parses every line of `text`. Valid entries and per-line errors are returned
/// separately so the caller can log invalid lines and keep going.
pub fn parse_entries(text: &str, seps: &Separators) -> (Vec<Entry>, Vec<InputError>) {
    let mut entries = Vec::new();
    let mut errors = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        match parse_line(idx + 1, raw, seps) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
    }
    (entries, errors)
}

/// Reads and parses the URL list at `path`.
pub fn read_entries(path: &Path, seps: &Separators) -> Result<(Vec<Entry>, Vec<InputError>)> {
    tracing::debug!("opening {}", path.display());
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let (entries, errors) = parse_entries(&text, seps);
    tracing::debug!(
        "read {} entries ({} invalid lines) from {}",
        entries.len(),
        errors.len(),
        path.display()
    );
    Ok((entries, errors))
}
