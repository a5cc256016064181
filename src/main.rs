// Workout Scheduler
// Main entry point

mod cli;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Workout Scheduler");

    cli::run(cli::Cli::parse()).await
}
