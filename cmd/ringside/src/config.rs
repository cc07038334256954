//! Workout configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Workout settings, read from YAML and overridden by flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Length of a round in seconds (120 amateur, 180 pro).
    pub round_secs: u64,
    /// Rest between rounds in seconds.
    pub rest_secs: u64,
    /// Number of combination recordings, named `1..=combos`.
    pub combos: u32,
    /// Directory holding the recordings.
    pub wave_dir: PathBuf,
    /// Recording file extension, without the dot.
    pub extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_secs: 180,
            rest_secs: 60,
            combos: 18,
            wave_dir: PathBuf::from("./waves"),
            extension: "wav".to_string(),
        }
    }
}

impl Config {
    /// Reads a YAML config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.round_secs == 0 {
            bail!("round_secs must be positive");
        }
        if self.combos == 0 {
            bail!("combos must be at least 1");
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            bail!("extension must be given without a leading dot");
        }
        Ok(())
    }

    pub fn round_len(&self) -> Duration {
        Duration::from_secs(self.round_secs)
    }

    pub fn rest(&self) -> Duration {
        Duration::from_secs(self.rest_secs)
    }

    /// Path of the recording for combination `id`.
    pub fn combo_path(&self, id: u32) -> PathBuf {
        self.wave_dir.join(format!("{}.{}", id, self.extension))
    }
}
