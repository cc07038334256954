//! ringside - Calls out punching combinations for a shadowboxing workout.

mod config;
mod session;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ringside_audio::PlaybackSink;
use tracing_subscriber::EnvFilter;

use config::Config;
use session::Session;

/// Shadowboxing round timer.
///
/// Each round plays randomly chosen combination recordings back to back
/// until the round time is up, then rests before the next round.
#[derive(Parser, Debug)]
#[command(name = "ringside")]
#[command(about = "Shadowboxing round timer")]
#[command(version)]
struct Args {
    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of rounds (prompted for when omitted)
    #[arg(short = 'r', long)]
    rounds: Option<u32>,

    /// Round length in seconds
    #[arg(long)]
    round_secs: Option<u64>,

    /// Rest between rounds in seconds
    #[arg(long)]
    rest_secs: Option<u64>,

    /// Number of combination recordings
    #[arg(long)]
    combos: Option<u32>,

    /// Directory holding the recordings
    #[arg(long)]
    wave_dir: Option<PathBuf>,

    /// Recording file extension (wav or au)
    #[arg(long)]
    extension: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(v) = self.round_secs {
            config.round_secs = v;
        }
        if let Some(v) = self.rest_secs {
            config.rest_secs = v;
        }
        if let Some(v) = self.combos {
            config.combos = v;
        }
        if let Some(v) = &self.wave_dir {
            config.wave_dir = v.clone();
        }
        if let Some(v) = &self.extension {
            config.extension = v.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = args.config()?;
    tracing::debug!(?config, "loaded config");

    let mut stdout = io::stdout();
    let rounds = match args.rounds {
        Some(n) => n,
        None => session::prompt_rounds(&mut io::stdin().lock(), &mut stdout)?,
    };
    println!("Very good, sir.");

    Session::new(config, PlaybackSink::default()).run(rounds, &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["ringside", "--rounds", "3", "--combos", "5", "--extension", "au"]);
        assert_eq!(args.rounds, Some(3));
        let config = args.config().unwrap();
        assert_eq!(config.combos, 5);
        assert_eq!(config.round_secs, 180);
        assert_eq!(config.combo_path(5), PathBuf::from("./waves/5.au"));
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ringside.yaml");
        std::fs::write(&path, "round_secs: 120\nrest_secs: 30\n").unwrap();

        let args = Args::parse_from([
            "ringside",
            "--config",
            path.to_str().unwrap(),
            "--rest-secs",
            "45",
        ]);
        let config = args.config().unwrap();
        assert_eq!(config.round_secs, 120);
        assert_eq!(config.rest_secs, 45);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let args = Args::parse_from(["ringside", "--combos", "0"]);
        assert!(args.config().is_err());
    }
}
