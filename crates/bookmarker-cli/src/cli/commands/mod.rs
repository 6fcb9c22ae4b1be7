//! CLI command handlers.

mod build;
mod check;
mod config;

pub use build::run_build;
pub use check::run_check;
pub use config::run_show_config;
