//! CLI for bookmarker.

mod commands;

use anyhow::Result;
use bookmarker_core::config::{self, BookmarkerConfig, LoadedConfig};
use bookmarker_core::logging;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_build, run_check, run_show_config};

/// Top-level CLI for bookmarker.
#[derive(Debug, Parser)]
#[command(name = "bookmarker")]
#[command(about = "Turn a list of URLs into an importable bookmarks HTML file", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/bookmarker/config.toml, created if missing).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for the build command; unset flags keep the config value.
#[derive(Debug, Default, Args)]
pub struct BuildArgs {
    /// URL list to read.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,
    /// Bookmarks HTML file to write.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Fetch favicons and embed them as data URIs.
    #[arg(long)]
    pub favicon: bool,
    /// Sort bookmarks by folder, then URL.
    #[arg(long)]
    pub sort: bool,
    /// Pause between fetches in milliseconds.
    #[arg(long, value_name = "MS")]
    pub sleep: Option<u64>,
}

impl BuildArgs {
    fn apply(&self, cfg: &mut BookmarkerConfig) {
        if let Some(p) = &self.input {
            cfg.urls_file = p.clone();
        }
        if let Some(p) = &self.output {
            cfg.bookmarks_html_file = p.clone();
        }
        if self.favicon {
            cfg.favicon = true;
        }
        if self.sort {
            cfg.sort = true;
        }
        if let Some(ms) = self.sleep {
            cfg.sleep = ms;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every URL and write the bookmarks HTML file.
    Build(BuildArgs),

    /// Parse the URL list without fetching and show the folder layout.
    Check {
        /// URL list to read.
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

/// `--config` must exist; the XDG default is created when missing.
fn load_config(explicit: Option<&PathBuf>) -> Result<LoadedConfig> {
    match explicit {
        Some(p) => Ok(LoadedConfig {
            config: config::load(p)?,
            path: p.clone(),
            created: false,
        }),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let loaded = load_config(cli.config.as_ref())?;
        let mut cfg = loaded.config;

        if let CliCommand::Build(args) = &cli.command {
            args.apply(&mut cfg);
        }

        if let Err(e) = logging::init_logging(cfg.log_file.as_deref(), &cfg.log_level) {
            logging::init_logging_stderr(&cfg.log_level);
            tracing::warn!("file logging unavailable, using stderr: {:#}", e);
        }
        if loaded.created {
            tracing::info!("created default config at {}", loaded.path.display());
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Build(_) => run_build(&cfg)?,
            CliCommand::Check { input } => {
                if let Some(p) = input {
                    cfg.urls_file = p;
                }
                run_check(&cfg)?
            }
            CliCommand::Config => run_show_config(&cfg, &loaded.path)?,
        }

        Ok(())
    }
}
