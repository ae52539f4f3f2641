use anyhow::{Context, Result};
use clap::Parser;
use std::process::exit;
use tracing_subscriber::EnvFilter;

use textsearch_lib::cli::{handle_command, CliArgs};
use textsearch_lib::config;

fn main() -> Result<()> {
    // --- Setup Tracing ---
    // Diagnostics go to stderr so stdout carries only search output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // --- Parse Args ---
    let args = CliArgs::parse();

    // --- Load Configuration ---
    let config = match config::load_config(args.config.as_ref()).context("Failed to load configuration") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit(1);
        }
    };

    // --- Execute Search ---
    tracing::debug!("Executing search: {:?}", args);
    match handle_command(&args, &config) {
        Ok(summary) => {
            tracing::info!(
                directories = summary.directories_visited,
                files = summary.files_scanned,
                skipped = summary.files_skipped,
                matches = summary.lines_matched,
                "Search complete"
            );
        }
        Err(e) => {
            tracing::debug!("Search failed: {:?}", e);
            eprintln!("Error: {:#}", e);
            exit(1);
        }
    }

    Ok(())
}
