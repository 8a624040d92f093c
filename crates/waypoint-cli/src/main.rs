//! Waypoint CLI: track events and their step checklists from the terminal.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use waypoint_core::TrackerBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;
    info!("Using database {}", tracker.database_path().display());

    let renderer = TerminalRenderer::new(!no_color);
    Cli::new(tracker, renderer).run(command).await
}
