//! Synthetic tones.
//!
//! Generates normalized sample buffers from numeric parameters only; nothing
//! here touches a file or a device.
//!
//! # Example
//!
//! ```rust
//! use ringside_audio::pcm::FormatDescriptor;
//! use ringside_audio::tone;
//!
//! let rate = FormatDescriptor::CANONICAL.sample_rate();
//! let a4 = tone::note(rate, tone::A4, 0.5, 0.8).unwrap();
//! assert_eq!(a4.len(), 22050);
//! ```

mod notes;

pub use notes::*;

use std::f64::consts::PI;

use crate::error::{Error, Result};

/// Amplitude used for each note of [`major_scale`].
pub const SCALE_AMPLITUDE: f64 = 0.5;

/// Duration in seconds of each note of [`major_scale`].
pub const SCALE_NOTE_SECS: f64 = 1.0;

/// Longest tone [`note`] will generate, in seconds.
pub const MAX_NOTE_SECS: f64 = 3600.0;

/// Largest sample count a `Vec<f64>` can hold.
const MAX_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Generates a sine tone.
///
/// Produces `round(sample_rate * duration_secs)` samples of
/// `amplitude * sin(2π * i * hz / sample_rate)`.
pub fn note(sample_rate: u32, hz: f64, duration_secs: f64, amplitude: f64) -> Result<Vec<f64>> {
    if sample_rate == 0 {
        return Err(Error::InvalidParameter("sample rate must be positive".into()));
    }
    if !(hz > 0.0) || !hz.is_finite() {
        return Err(Error::InvalidParameter(format!("frequency {hz} must be positive")));
    }
    if !(duration_secs >= 0.0) || !duration_secs.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "duration {duration_secs} must be non-negative"
        )));
    }
    if duration_secs > MAX_NOTE_SECS {
        return Err(Error::InvalidParameter(format!(
            "duration {duration_secs}s exceeds {MAX_NOTE_SECS}s"
        )));
    }
    if !(0.0..=1.0).contains(&amplitude) {
        return Err(Error::InvalidParameter(format!(
            "amplitude {amplitude} outside [0, 1]"
        )));
    }

    let rate = sample_rate as f64;
    let n = (rate * duration_secs).round();
    if n > MAX_SAMPLES as f64 {
        return Err(Error::InvalidParameter(format!(
            "duration {duration_secs}s exceeds {MAX_SAMPLES} samples"
        )));
    }
    let n = n as usize;
    Ok((0..n)
        .map(|i| amplitude * (2.0 * PI * i as f64 * hz / rate).sin())
        .collect())
}

/// Generates the eight one-second notes of the major scale on `root_hz`.
///
/// The order is fixed: root, 2, 4, 5, 7, 9, 11 and 12 semitones up.
pub fn major_scale(sample_rate: u32, root_hz: f64) -> Result<Vec<Vec<f64>>> {
    major_scale_frequencies(root_hz)
        .into_iter()
        .map(|hz| note(sample_rate, hz, SCALE_NOTE_SECS, SCALE_AMPLITUDE))
        .collect()
}
