//! The batch run: read entries, fetch each page in order, write the HTML.

use anyhow::Result;
use std::path::PathBuf;

use crate::bookmark::{self, Bookmark};
use crate::config::BookmarkerConfig;
use crate::fetch::{FetchSettings, Fetcher};
use crate::input::{self, Entry, Separators};
use crate::pacer::{Pacer, Pause};
use crate::page::{self, PageMeta};
use crate::writer;

/// Counts reported after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Bookmarks written.
    pub total: usize,
    /// Entries whose page was fetched successfully.
    pub fetched: usize,
    /// Entries written with the URL as title because the fetch failed.
    pub failed: usize,
    /// Input lines skipped as invalid.
    pub skipped: usize,
    pub output_path: PathBuf,
}

/// Per-run options derived from the config.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub rewrite_url: bool,
    pub favicon: bool,
}

impl BuildOptions {
    pub fn from_config(cfg: &BookmarkerConfig) -> Self {
        Self {
            rewrite_url: cfg.rewrite_url,
            favicon: cfg.favicon,
        }
    }
}

/// Fetches one entry and builds its bookmark. Request errors are logged and
/// the URL becomes the title; the second value reports whether the fetch succeeded.
pub fn build_bookmark(fetcher: &Fetcher, entry: &Entry, opts: &BuildOptions) -> (Bookmark, bool) {
    tracing::debug!("retrieving info for {:?} (line {})", entry.url, entry.line);

    let resp = match fetcher.get(&entry.url) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("error retrieving {}: {}", entry.url, e);
            let bm = Bookmark {
                url: entry.url.clone(),
                title: entry.url.clone(),
                favicon: None,
                folders: entry.folders.clone(),
            };
            return (bm, false);
        }
    };

    let url = if opts.rewrite_url && resp.effective_url != entry.url {
        tracing::debug!("rewriting URL from {:?} to {:?}", entry.url, resp.effective_url);
        resp.effective_url.clone()
    } else {
        entry.url.clone()
    };

    let meta = PageMeta::parse(&resp.text());

    let title = meta.title.unwrap_or_else(|| url.clone());
    tracing::debug!("title = {:?}", title);

    let favicon = match (opts.favicon, &meta.icon) {
        (true, Some(link)) => match page::fetch_favicon(fetcher, &resp.effective_url, link) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("favicon for {} skipped: {:#}", url, e);
                None
            }
        },
        (true, None) => {
            tracing::debug!("no icon link in {}", url);
            None
        }
        (false, _) => None,
    };

    (
        Bookmark {
            url,
            title,
            favicon,
            folders: entry.folders.clone(),
        },
        true,
    )
}

/// Builds a bookmark per entry in order, pausing between fetches (not after
/// the last). Returns the bookmarks and how many fetches succeeded.
pub fn fetch_all<P: Pause>(
    fetcher: &Fetcher,
    entries: &[Entry],
    opts: &BuildOptions,
    pacer: &mut P,
) -> (Vec<Bookmark>, usize) {
    let mut bookmarks = Vec::with_capacity(entries.len());
    let mut fetched = 0;
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            pacer.pause();
        }
        let (bm, ok) = build_bookmark(fetcher, entry, opts);
        if ok {
            fetched += 1;
        }
        bookmarks.push(bm);
    }
    (bookmarks, fetched)
}

/// Runs the whole pipeline with the given config.
pub fn run(cfg: &BookmarkerConfig) -> Result<RunSummary> {
    cfg.validate()?;
    let seps = Separators {
        folder: cfg.folder_separator.clone(),
        subfolder: cfg.subfolder_separator.clone(),
    };
    let (entries, errors) = input::read_entries(&cfg.urls_file, &seps)?;
    for e in &errors {
        tracing::error!("skipping input line: {}", e);
    }
    tracing::info!("read {} URLs from {}", entries.len(), cfg.urls_file.display());

    let started = writer::unix_now();
    let fetcher = Fetcher::new(FetchSettings::from_config(cfg));
    let opts = BuildOptions::from_config(cfg);
    let mut pacer = Pacer::new(cfg.sleep, cfg.random_sleep);

    let (mut bookmarks, fetched) = fetch_all(&fetcher, &entries, &opts, &mut pacer);

    if cfg.sort {
        bookmark::sort_by_location(&mut bookmarks);
    }

    writer::write_bookmarks(
        &cfg.bookmarks_html_file,
        &bookmarks,
        &cfg.toolbar_folder,
        started,
    )?;

    let summary = RunSummary {
        total: bookmarks.len(),
        fetched,
        failed: bookmarks.len() - fetched,
        skipped: errors.len(),
        output_path: cfg.bookmarks_html_file.clone(),
    };
    tracing::info!(
        "wrote {} bookmarks ({} fetched, {} failed, {} skipped) to {}",
        summary.total,
        summary.fetched,
        summary.failed,
        summary.skipped,
        summary.output_path.display()
    );
    Ok(summary)
}
