// Footo dispatcher - main.rs
// Thin bootstrap: logging to stderr, parse CLI, dispatch, propagate exit code

use std::process::exit;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use footo::cli::{dispatch, Cli};

fn main() {
    // All diagnostics go to stderr; stdout belongs to the shell bridge.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("FOOTO_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    exit(dispatch(cli));
}
