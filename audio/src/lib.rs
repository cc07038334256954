//! PCM audio: sample codec, tone synthesis and blocking playback.
//!
//! This crate provides:
//!
//! - `pcm`: [`FormatDescriptor`] and conversion between raw PCM bytes and
//!   normalized `f64` samples
//! - `tone`: sine tones and major scales
//! - `source` / `writer`: loading and saving `.wav` and `.au` files
//! - `playback`: a sink that blocks until the device has played the audio
//!
//! # Example
//!
//! ```rust,no_run
//! use ringside_audio::{source, tone, writer, FormatDescriptor, PlaybackSink};
//!
//! let rate = FormatDescriptor::CANONICAL.sample_rate();
//! let a4 = tone::note(rate, tone::A4, 1.0, 0.5)?;
//! writer::save(&a4, "a4.wav")?;
//!
//! let samples = source::read("a4.wav")?;
//! PlaybackSink::default().play_blocking(&samples)?;
//! # Ok::<(), ringside_audio::Error>(())
//! ```

pub mod container;
mod error;
pub mod pcm;
pub mod playback;
#[cfg(feature = "portaudio")]
pub mod portaudio;
pub mod source;
pub mod tone;
pub mod writer;

pub use error::{Error, Result};
pub use pcm::FormatDescriptor;
pub use playback::{BusyPolicy, PlaybackSink};
pub use source::Clip;
