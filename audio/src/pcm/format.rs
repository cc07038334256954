//! PCM stream shape.

use std::time::Duration;

use crate::error::{Error, Result};

/// Describes the layout of a raw PCM byte stream.
///
/// Only mono streams with 8 or 16 bits per sample are representable; the
/// constructor rejects everything else so a descriptor in hand is always
/// decodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
    sample_rate: u32,
    bit_depth: u16,
    channels: u16,
    signed: bool,
    little_endian: bool,
}

impl FormatDescriptor {
    /// 44.1kHz, 16-bit, mono, signed, little-endian.
    ///
    /// Used for everything synthesized or saved.
    pub const CANONICAL: FormatDescriptor = FormatDescriptor {
        sample_rate: 44100,
        bit_depth: 16,
        channels: 1,
        signed: true,
        little_endian: true,
    };

    /// Creates a validated descriptor.
    pub fn new(
        sample_rate: u32,
        bit_depth: u16,
        channels: u16,
        signed: bool,
        little_endian: bool,
    ) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::Format("sample rate must be positive".into()));
        }
        if bit_depth != 8 && bit_depth != 16 {
            return Err(Error::Format(format!("unsupported bit depth {bit_depth}")));
        }
        if channels != 1 {
            return Err(Error::Format(format!(
                "unsupported channel count {channels}, only mono is supported"
            )));
        }
        Ok(Self {
            sample_rate,
            bit_depth,
            channels,
            signed,
            little_endian,
        })
    }

    /// Returns a copy of this format with the given byte order.
    pub const fn with_endianness(self, little_endian: bool) -> Self {
        Self {
            little_endian,
            ..self
        }
    }

    /// Returns a copy of this format with the given signedness.
    pub const fn with_signedness(self, signed: bool) -> Self {
        Self { signed, ..self }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn is_little_endian(&self) -> bool {
        self.little_endian
    }

    /// Returns the number of bytes in one frame.
    pub fn frame_size(&self) -> usize {
        (self.bit_depth as usize / 8) * self.channels as usize
    }

    /// Returns the magnitude of the integer range used for normalization
    /// (32768.0 for 16-bit, 128.0 for 8-bit).
    pub fn full_scale(&self) -> f64 {
        (1u32 << (self.bit_depth - 1)) as f64
    }

    /// Returns the smallest representable amplitude change.
    pub fn quantization_step(&self) -> f64 {
        1.0 / self.full_scale()
    }

    /// Returns the byte rate (bytes per second).
    pub fn bytes_rate(&self) -> u64 {
        self.sample_rate as u64 * self.frame_size() as u64
    }

    /// Returns the number of bytes covering the given duration.
    pub fn bytes_in_duration(&self, duration: Duration) -> u64 {
        let frames = (self.sample_rate as u128 * duration.as_nanos()) / 1_000_000_000;
        frames as u64 * self.frame_size() as u64
    }

    /// Returns the playback duration of `bytes` bytes of audio.
    pub fn duration(&self, bytes: u64) -> Duration {
        let frames = bytes / self.frame_size() as u64;
        Duration::from_nanos((frames as u128 * 1_000_000_000 / self.sample_rate as u128) as u64)
    }
}

impl Default for FormatDescriptor {
    fn default() -> Self {
        Self::CANONICAL
    }
}
