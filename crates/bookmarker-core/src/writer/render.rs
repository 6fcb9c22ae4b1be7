//! Netscape bookmark HTML rendering.
//!
//! Layout follows what browsers export: a `<DL><p>` list per folder, each
//! entry on its own `<DT>` line, four spaces of indent per level.

use std::fmt::Write as _;

use super::tree::FolderNode;
use crate::bookmark::Bookmark;

const INDENT: &str = "    ";

const HEADER: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
";

/// Escapes text and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

struct Renderer {
    out: String,
    timestamp: u64,
}

impl Renderer {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn folder_heading(&self, name: &str, toolbar: bool) -> String {
        let mut h = format!(
            "<DT><H3 ADD_DATE=\"{ts}\" LAST_MODIFIED=\"{ts}\"",
            ts = self.timestamp
        );
        if toolbar {
            h.push_str(" PERSONAL_TOOLBAR_FOLDER=\"true\"");
        }
        let _ = write!(h, ">{}</H3>", escape_html(name));
        h
    }

    fn bookmark(&mut self, depth: usize, bm: &Bookmark) {
        let mut a = format!(
            "<DT><A HREF=\"{href}\" ADD_DATE=\"{ts}\" LAST_MODIFIED=\"{ts}\"",
            href = escape_html(&bm.url),
            ts = self.timestamp
        );
        if let Some(icon) = &bm.favicon {
            let _ = write!(a, " ICON=\"{}\"", escape_html(icon));
        }
        let _ = write!(a, ">{}</A>", escape_html(&bm.title));
        self.line(depth, &a);
    }

    /// Subfolders first, then the node's own bookmarks.
    fn contents(&mut self, depth: usize, node: &FolderNode<'_>) {
        for child in &node.folders {
            let heading = self.folder_heading(&child.name, false);
            self.line(depth, &heading);
            self.line(depth, "<DL><p>");
            self.contents(depth + 1, child);
            self.line(depth, "</DL><p>");
        }
        for bm in &node.bookmarks {
            self.bookmark(depth, bm);
        }
    }
}

/// Renders the full document. Everything sits inside one toolbar folder.
pub fn render_document(root: &FolderNode<'_>, toolbar_folder: &str, timestamp: u64) -> String {
    let mut r = Renderer {
        out: String::from(HEADER),
        timestamp,
    };
    r.line(0, "<DL><p>");
    let heading = r.folder_heading(toolbar_folder, true);
    r.line(1, &heading);
    r.line(1, "<DL><p>");
    r.contents(2, root);
    r.line(1, "</DL><p>");
    r.line(0, "</DL><p>");
    r.out
}
