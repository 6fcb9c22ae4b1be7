//! `bookmarker config` – print where the config lives and what is in effect.

use anyhow::Result;
use bookmarker_core::config::BookmarkerConfig;
use std::path::Path;

pub fn run_show_config(cfg: &BookmarkerConfig, path: &Path) -> Result<()> {
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
