// crates/remove_handlers/src/config.rs

use anyhow::{bail, Result};
use clap::Parser;
use handler_markers::{DEFAULT_TARGET_PATH, END_MARKER, START_MARKER};
use std::path::PathBuf;
use strip_marked_range::processor::StripConfig;

/// Deletes the lines from the last start marker up to (not including) the last end marker.
///
/// Every setting falls back to an environment variable and then to the built-in value,
/// so running with no arguments edits the default widget file.
#[derive(Parser, Debug)]
#[command(name = "remove_handlers", version)]
pub struct Cli {
    /// File to edit in place
    #[arg(env = "REMOVE_HANDLERS_FILE", default_value = DEFAULT_TARGET_PATH)]
    pub file: PathBuf,

    /// Substring marking the first line to delete
    #[arg(
        long,
        env = "REMOVE_HANDLERS_START_MARKER",
        default_value = START_MARKER,
        allow_hyphen_values = true
    )]
    pub start_marker: String,

    /// Substring marking the first line to keep after the deleted range
    #[arg(
        long,
        env = "REMOVE_HANDLERS_END_MARKER",
        default_value = END_MARKER,
        allow_hyphen_values = true
    )]
    pub end_marker: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Validates the parsed arguments and turns them into a `StripConfig`.
    pub fn into_config(self) -> Result<StripConfig> {
        // An empty substring matches every line.
        if self.start_marker.is_empty() {
            bail!("--start-marker must not be empty");
        }
        if self.end_marker.is_empty() {
            bail!("--end-marker must not be empty");
        }

        Ok(StripConfig {
            target: self.file,
            start_marker: self.start_marker,
            end_marker: self.end_marker,
        })
    }
}
