use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::config::GameConfig;

#[derive(Debug, Parser)]
#[command(name = "huematch")]
#[command(about = "🎨 Spot the swatch that matches the target color")]
#[command(version)]
pub struct Cli {
    /// TOML file with game settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for reproducible rounds
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override how long feedback stays up after a guess (milliseconds)
    #[arg(long)]
    pub feedback_ms: Option<u64>,

    /// Write logs here; nothing is logged otherwise
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(ms) = self.feedback_ms {
            config.feedback_delay_ms = ms;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
