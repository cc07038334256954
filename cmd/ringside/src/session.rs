//! The workout loop: rounds of random combinations separated by rest.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use rand::Rng;
use ringside_audio::playback::OutputDevice;
use ringside_audio::{PlaybackSink, source};
use tracing::{debug, info};

use crate::config::Config;

/// Asks for the number of rounds until a whole number is entered.
///
/// Negative answers count as their magnitude.
pub fn prompt_rounds<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<u32> {
    let mut line = String::new();
    loop {
        write!(out, "How many rounds will you be doing today? ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before a round count was given");
        }
        if let Ok(n) = line.trim().parse::<i64>() {
            return u32::try_from(n.unsigned_abs()).context("round count too large");
        }
    }
}

/// Picks a combination id uniformly from `1..=combos`.
pub fn pick_combo<R: Rng + ?Sized>(rng: &mut R, combos: u32) -> u32 {
    rng.gen_range(1..=combos)
}

pub struct Session<D> {
    config: Config,
    sink: PlaybackSink<D>,
}

impl<D: OutputDevice> Session<D> {
    pub fn new(config: Config, sink: PlaybackSink<D>) -> Self {
        Self { config, sink }
    }

    /// Runs `rounds` rounds, printing the calls to `out`.
    ///
    /// Any load or playback failure ends the session.
    pub fn run<W: Write>(&self, rounds: u32, out: &mut W) -> Result<()> {
        self.config.validate()?;
        for round in 1..=rounds {
            writeln!(out, "Round {round} - Begin!")?;
            let played = self.round()?;
            info!(round, played, "round finished");

            if round == rounds {
                break;
            }
            writeln!(
                out,
                "Dingding!!! Take {} seconds of rest.",
                self.config.rest_secs
            )?;
            thread::sleep(self.config.rest());
        }
        writeln!(out, "Good workout!")?;
        Ok(())
    }

    /// Plays combinations until the round time is up. Returns how many played.
    fn round(&self) -> Result<usize> {
        let mut rng = rand::thread_rng();
        let start = Instant::now();
        let mut played = 0;
        while start.elapsed() < self.config.round_len() {
            let id = pick_combo(&mut rng, self.config.combos);
            let path = self.config.combo_path(id);
            debug!(id, path = %path.display(), "combo");

            let clip = source::load(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            self.sink
                .play_clip(&clip)
                .with_context(|| format!("failed to play {}", path.display()))?;
            played += 1;
        }
        Ok(played)
    }
}
