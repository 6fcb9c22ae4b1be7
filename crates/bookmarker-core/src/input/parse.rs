//! Single-line parsing.

use super::{Entry, Separators};

/// A line that looks like an entry but cannot become one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("line {line}: no URL after folder separator")]
    MissingUrl { line: usize },
}

/// Parses one line. Returns `Ok(None)` for blank lines and `#` comments.
///
/// Only the first folder separator splits the line, so URLs may contain it
/// (e.g. `Docs|https://example.com/?a=1|2`).
pub fn parse_line(line: usize, raw: &str, seps: &Separators) -> Result<Option<Entry>, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (folders, url) = match trimmed.split_once(seps.folder.as_str()) {
        Some((path, url)) => {
            let folders = path
                .split(seps.subfolder.as_str())
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
            (folders, url.trim())
        }
        None => (Vec::new(), trimmed),
    };

    if url.is_empty() {
        return Err(InputError::MissingUrl { line });
    }

    tracing::trace!("folders({}) = {:?}", url, folders);

    Ok(Some(Entry {
        line,
        folders,
        url: url.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Option<Entry> {
        parse_line(1, raw, &Separators::default()).unwrap()
    }

    #[test]
    fn bare_url_has_no_folders() {
        let e = parse("https://example.com/").unwrap();
        assert!(e.folders.is_empty());
        assert_eq!(e.url, "https://example.com/");
    }

    #[test]
    fn folder_and_subfolder() {
        let e = parse("Work,Tools|https://github.com/").unwrap();
        assert_eq!(e.folders, vec!["Work", "Tools"]);
        assert_eq!(e.url, "https://github.com/");
    }

    #[test]
    fn trims_names_and_drops_empty_ones() {
        let e = parse("  Dev , , Rust | https://docs.rs/  ").unwrap();
        assert_eq!(e.folders, vec!["Dev", "Rust"]);
        assert_eq!(e.url, "https://docs.rs/");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let e = parse("Docs|https://example.com/?q=a|b").unwrap();
        assert_eq!(e.folders, vec!["Docs"]);
        assert_eq!(e.url, "https://example.com/?q=a|b");
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert!(parse("").is_none());
        assert!(parse("   \t").is_none());
        assert!(parse("# Folder|https://example.com/").is_none());
    }

    #[test]
    fn empty_url_is_error() {
        let err = parse_line(7, "Folder|   ", &Separators::default()).unwrap_err();
        assert_eq!(err, InputError::MissingUrl { line: 7 });
        assert_eq!(err.to_string(), "line 7: no URL after folder separator");
    }

    #[test]
    fn custom_separators() {
        let seps = Separators {
            folder: " => ".to_string(),
            subfolder: "/".to_string(),
        };
        let e = parse_line(1, "A/B => https://example.com/", &seps)
            .unwrap()
            .unwrap();
        assert_eq!(e.folders, vec!["A", "B"]);
        assert_eq!(e.url, "https://example.com/");
    }
}
