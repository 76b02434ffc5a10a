use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Options are picked with the digit keys 1-9.
pub const MAX_OPTIONS: usize = 9;

/// Tunables for a session. Every field has a default, so a config file may set any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Swatches shown per round, target included.
    pub option_count: usize,
    /// Near-miss colors derived from the target.
    pub decoys: usize,
    /// Max per-channel offset of a decoy.
    pub decoy_spread: f64,
    /// How long guesses stay locked after one is made.
    pub feedback_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            option_count: 6,
            decoys: 2,
            decoy_spread: super::color::DEFAULT_SPREAD,
            feedback_delay_ms: 1500,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_OPTIONS).contains(&self.option_count) {
            bail!("option_count must be between 2 and {}, got {}", MAX_OPTIONS, self.option_count);
        }
        if self.decoys >= self.option_count {
            bail!("decoys ({}) must leave room for the target among {} options", self.decoys, self.option_count);
        }
        if !self.decoy_spread.is_finite() || self.decoy_spread < 0.0 {
            bail!("decoy_spread must be a non-negative number, got {}", self.decoy_spread);
        }
        Ok(())
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }
}
