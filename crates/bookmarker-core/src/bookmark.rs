//! The bookmark record passed from the fetch stage to the writer.

use std::cmp::Ordering;

/// One bookmark, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    /// Favicon as a `data:` URI.
    pub favicon: Option<String>,
    /// Folder path from outermost to innermost; empty for root bookmarks.
    pub folders: Vec<String>,
}

impl Bookmark {
    pub fn folder(&self) -> Option<&str> {
        self.folders.first().map(String::as_str)
    }

    pub fn subfolder(&self) -> Option<&str> {
        self.folders.get(1).map(String::as_str)
    }
}

/// Folder path first (element by element), then URL.
pub fn cmp_location(a: &Bookmark, b: &Bookmark) -> Ordering {
    (&a.folders, &a.url).cmp(&(&b.folders, &b.url))
}

/// Stable sort by location; equal locations keep input order.
pub fn sort_by_location(bookmarks: &mut [Bookmark]) {
    bookmarks.sort_by(cmp_location);
}
