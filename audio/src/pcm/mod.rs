//! PCM (Pulse Code Modulation) audio format handling.
//!
//! # Key Types
//!
//! - [`FormatDescriptor`]: shape of a raw PCM stream (rate, depth, signedness, byte order)
//! - [`decode`] / [`encode`]: conversion between raw bytes and normalized `f64` samples
//!
//! # Example
//!
//! ```rust
//! use ringside_audio::pcm::{self, FormatDescriptor};
//!
//! let format = FormatDescriptor::CANONICAL;
//! let bytes = pcm::encode(&[0.5, -0.5, 1.5], &format);
//! let samples = pcm::decode(&bytes, &format);
//! assert_eq!(samples[0], 0.5);
//! assert_eq!(samples[2], 32767.0 / 32768.0); // clipped, not wrapped
//! ```

mod codec;
mod format;

pub use codec::{decode, encode};
pub use format::FormatDescriptor;
