use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use huematch::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The game owns the terminal, so logs only go to a file
    if let Some(path) = &cli.log_file {
        let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = cli.game_config()?;
    tracing::info!(?config, seed = ?cli.seed, "starting huematch");
    huematch::engine::run(config, cli.rng()).await
}
