//! Blocking playback to an audio output device.
//!
//! [`PlaybackSink`] streams a buffer to an [`OutputLine`] opened from an
//! [`OutputDevice`], waits for the device to drain, then releases the line.
//! A call does not return until the audio has finished playing, so callers
//! may use the call duration as a clock.
//!
//! Only one line is open per process at a time. Concurrent callers either
//! wait their turn ([`BusyPolicy::Wait`]) or fail with
//! [`Error::DeviceBusy`](crate::Error::DeviceBusy) ([`BusyPolicy::FailFast`]).
//!
//! # Example
//!
//! ```ignore
//! use ringside_audio::playback::PlaybackSink;
//!
//! let sink = PlaybackSink::default();
//! sink.play_file("waves/3.wav")?;
//! ```

mod device;
mod sink;

pub use device::{NoDevice, OutputDevice, OutputLine};
pub use sink::{BusyPolicy, PlaybackSink};

/// Device used by [`PlaybackSink::default`].
#[cfg(feature = "portaudio")]
pub type DefaultDevice = crate::portaudio::PortAudioDevice;

/// Device used by [`PlaybackSink::default`].
#[cfg(not(feature = "portaudio"))]
pub type DefaultDevice = NoDevice;

/// Returns the output device compiled into this build.
pub fn default_device() -> DefaultDevice {
    DefaultDevice::default()
}
