//! `bookmarker check` – parse the URL list offline.

use anyhow::Result;
use bookmarker_core::config::BookmarkerConfig;
use bookmarker_core::input::{self, Entry, Separators};

/// `folder/subfolder -> url`, or `(root) -> url`.
pub fn format_entry(entry: &Entry) -> String {
    if entry.folders.is_empty() {
        format!("(root) -> {}", entry.url)
    } else {
        format!("{} -> {}", entry.folders.join("/"), entry.url)
    }
}

pub fn run_check(cfg: &BookmarkerConfig) -> Result<()> {
    let seps = Separators {
        folder: cfg.folder_separator.clone(),
        subfolder: cfg.subfolder_separator.clone(),
    };
    let (entries, errors) = input::read_entries(&cfg.urls_file, &seps)?;
    for e in &entries {
        println!("{}", format_entry(e));
    }
    for e in &errors {
        eprintln!("invalid: {}", e);
    }
    println!(
        "{} entries, {} invalid lines in {}",
        entries.len(),
        errors.len(),
        cfg.urls_file.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_formats_entries() {
        let root = Entry {
            line: 1,
            folders: vec![],
            url: "https://example.com/".to_string(),
        };
        let nested = Entry {
            line: 2,
            folders: vec!["Dev".to_string(), "Rust".to_string()],
            url: "https://docs.rs/".to_string(),
        };
        assert_eq!(format_entry(&root), "(root) -> https://example.com/");
        assert_eq!(format_entry(&nested), "Dev/Rust -> https://docs.rs/");
    }
}
