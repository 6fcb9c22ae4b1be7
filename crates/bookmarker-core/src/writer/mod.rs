//! Bookmark HTML output.

mod render;
mod tree;

pub use render::{escape_html, render_document};
pub use tree::{build_tree, FolderNode};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::bookmark::Bookmark;

/// Current time in Unix seconds, used for `ADD_DATE` / `LAST_MODIFIED`.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Renders `bookmarks` and writes them to `path`, creating parent directories.
pub fn write_bookmarks(
    path: &Path,
    bookmarks: &[Bookmark],
    toolbar_folder: &str,
    timestamp: u64,
) -> Result<()> {
    let html = render_document(&build_tree(bookmarks), toolbar_folder, timestamp);

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    tracing::debug!("writing {} bookmarks to {}", bookmarks.len(), path.display());
    fs::write(path, html).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
