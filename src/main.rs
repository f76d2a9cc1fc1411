// chronica - audit trail CLI entrypoint

use clap::Parser;
use std::process::exit;
use tracing_subscriber::EnvFilter;

use chronica::cli::{dispatch, Cli};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = dispatch(cli) {
        tracing::error!("{e}");
        exit(1);
    }
}
