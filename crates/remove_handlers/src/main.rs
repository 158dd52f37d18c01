// crates/remove_handlers/src/main.rs

use anyhow::Result;
use clap::Parser;
use std::io;
use strip_marked_range::processor::{run_strip, FsDocumentStore};
use tracing_subscriber::EnvFilter;

mod config;

use config::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries only the progress messages.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = cli.into_config()?;
    log::debug!("resolved configuration: {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_strip(&FsDocumentStore, &config, &mut out)?;
    Ok(())
}
