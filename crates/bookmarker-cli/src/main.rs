mod cli;

use crate::cli::CliCommand;

fn main() {
    // Parse CLI, load config, init logging, and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("bookmarker error: {:#}", err);
        std::process::exit(1);
    }
}
