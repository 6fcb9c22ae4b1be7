//! `bookmarker build` – fetch titles and write the bookmarks file.

use anyhow::Result;
use bookmarker_core::config::BookmarkerConfig;
use bookmarker_core::pipeline;

pub fn run_build(cfg: &BookmarkerConfig) -> Result<()> {
    let summary = pipeline::run(cfg)?;
    println!(
        "Wrote {} bookmarks to {} ({} fetched, {} failed, {} invalid lines skipped)",
        summary.total,
        summary.output_path.display(),
        summary.fetched,
        summary.failed,
        summary.skipped
    );
    Ok(())
}
