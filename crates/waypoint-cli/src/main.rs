//! Waypoint CLI Application
//!
//! Command-line interface for the waypoint timeline scheduler.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use waypoint_core::SchedulerBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        busy_timeout_ms,
        no_color,
        command,
    } = Args::parse();

    let mut builder =
        SchedulerBuilder::new().with_busy_timeout(Duration::from_millis(busy_timeout_ms));
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    let scheduler = builder
        .build()
        .await
        .context("Failed to initialize scheduler")?;

    info!("Waypoint started");

    let cli = Cli::new(scheduler, TerminalRenderer::new(!no_color));
    match command {
        Commands::Timeline { command } => cli.handle_timeline_command(command).await,
        Commands::Milestone { command } => cli.handle_milestone_command(command).await,
    }
}
