//! Output device abstraction.

use crate::error::{Error, Result};
use crate::pcm::FormatDescriptor;

/// An open output line accepting raw PCM bytes.
///
/// A line is closed exactly once; implementations should also release the
/// underlying resource on drop in case `close` was never reached.
pub trait OutputLine: Send {
    /// Writes whole frames, blocking while the device buffer is full.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Blocks until everything written so far has been played.
    fn drain(&mut self) -> Result<()>;

    /// Releases the line.
    fn close(&mut self) -> Result<()>;
}

/// Something that can open output lines.
pub trait OutputDevice: Send + Sync {
    /// Opens and starts a line configured for `format`.
    fn open(&self, format: &FormatDescriptor) -> Result<Box<dyn OutputLine>>;
}

impl<D: OutputDevice + ?Sized> OutputDevice for &D {
    fn open(&self, format: &FormatDescriptor) -> Result<Box<dyn OutputLine>> {
        (**self).open(format)
    }
}

impl<D: OutputDevice + ?Sized> OutputDevice for std::sync::Arc<D> {
    fn open(&self, format: &FormatDescriptor) -> Result<Box<dyn OutputLine>> {
        (**self).open(format)
    }
}

/// A device that has no output; every open fails.
///
/// This is the default device when the crate is built without an audio
/// backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDevice;

impl OutputDevice for NoDevice {
    fn open(&self, _format: &FormatDescriptor) -> Result<Box<dyn OutputLine>> {
        Err(Error::Device(
            "no output backend compiled in (enable the `portaudio` feature)".into(),
        ))
    }
}
