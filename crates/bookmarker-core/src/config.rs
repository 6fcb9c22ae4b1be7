use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One extra request header sent with every GET (`[[headers]]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per URL (including the first).
    pub max_attempts: u32,
    /// Base delay in milliseconds for exponential backoff.
    pub base_delay_ms: u64,
    /// Maximum backoff delay in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

/// Global configuration loaded from `~/.config/bookmarker/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookmarkerConfig {
    /// Text file with one `Folder,Subfolder|URL` (or bare URL) per line.
    pub urls_file: PathBuf,
    /// Output bookmarks HTML file.
    pub bookmarks_html_file: PathBuf,
    /// Log file; when unset, logs go to the XDG state directory.
    pub log_file: Option<PathBuf>,
    /// Default `EnvFilter` directive when `RUST_LOG` is not set.
    pub log_level: String,
    /// Separates the folder path from the URL.
    pub folder_separator: String,
    /// Separates folder names inside the folder path.
    pub subfolder_separator: String,
    /// Pause between fetches in milliseconds (0 = none).
    pub sleep: u64,
    /// Scale each pause by a uniform random factor in [0, 1).
    pub random_sleep: bool,
    /// Total request timeout in seconds.
    pub timeout: u64,
    /// Store the post-redirect URL instead of the one from the input file.
    pub rewrite_url: bool,
    /// Fetch and embed favicons as data URIs.
    pub favicon: bool,
    /// Sort bookmarks by folder path, then URL.
    pub sort: bool,
    /// Name of the top-level folder wrapping every bookmark.
    pub toolbar_folder: String,
    pub headers: Vec<HeaderEntry>,
    /// Optional retry policy; if missing, every URL gets a single attempt.
    pub retry: Option<RetryConfig>,
}

impl Default for BookmarkerConfig {
    fn default() -> Self {
        Self {
            urls_file: PathBuf::from("urls.txt"),
            bookmarks_html_file: PathBuf::from("bookmarks.html"),
            log_file: None,
            log_level: "info".to_string(),
            folder_separator: "|".to_string(),
            subfolder_separator: ",".to_string(),
            sleep: 0,
            random_sleep: true,
            timeout: 60,
            rewrite_url: true,
            favicon: false,
            sort: false,
            toolbar_folder: "Bookmarks".to_string(),
            headers: Vec::new(),
            retry: None,
        }
    }
}

impl BookmarkerConfig {
    /// Rejects settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.folder_separator.is_empty() {
            anyhow::bail!("folder_separator must not be empty");
        }
        if self.subfolder_separator.is_empty() {
            anyhow::bail!("subfolder_separator must not be empty");
        }
        if self.folder_separator == self.subfolder_separator {
            anyhow::bail!(
                "folder_separator and subfolder_separator must differ (both {:?})",
                self.folder_separator
            );
        }
        if self.timeout == 0 {
            anyhow::bail!("timeout must be greater than 0");
        }
        if let Some(retry) = &self.retry {
            if retry.max_attempts == 0 {
                anyhow::bail!("retry.max_attempts must be at least 1");
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bookmarker")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load(path: &Path) -> Result<BookmarkerConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: BookmarkerConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Result of [`load_or_init`]; `created` is set when a default file was written.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: BookmarkerConfig,
    pub path: PathBuf,
    pub created: bool,
}

/// Load configuration from the XDG config path, creating a default file if none exists.
pub fn load_or_init() -> Result<LoadedConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, creating a default file if none exists.
/// Runs before logging is set up, so the caller reports `created`.
pub fn load_or_init_at(path: &Path) -> Result<LoadedConfig> {
    if !path.exists() {
        let default_cfg = BookmarkerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config {}", path.display()))?;
        return Ok(LoadedConfig {
            config: default_cfg,
            path: path.to_path_buf(),
            created: true,
        });
    }

    Ok(LoadedConfig {
        config: load(path)?,
        path: path.to_path_buf(),
        created: false,
    })
}
