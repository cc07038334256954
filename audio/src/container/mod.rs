//! PCM container formats, selected by file extension.
//!
//! - `.wav`: RIFF/WAVE, little-endian
//! - `.au`: Sun/NeXT AU, big-endian
//!
//! Extensions are matched case-insensitively. Both containers carry rate,
//! depth and channel count in their header, so readers always return the
//! declared [`FormatDescriptor`].

pub mod au;
pub mod wav;

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::pcm::FormatDescriptor;

/// A supported container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Wav,
    Au,
}

impl Container {
    /// Resolves the container implied by `path`'s extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("wav") => Ok(Container::Wav),
            Some("au") => Ok(Container::Au),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Returns the canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Container::Wav => "wav",
            Container::Au => "au",
        }
    }

    /// Returns how samples of shape `format` are laid out in this container.
    pub fn storage_format(&self, format: &FormatDescriptor) -> FormatDescriptor {
        match self {
            Container::Wav => wav::storage_format(format),
            Container::Au => au::storage_format(format),
        }
    }

    /// Reads sample bytes and their declared format.
    pub fn read<R: Read>(&self, mut r: R) -> Result<(Vec<u8>, FormatDescriptor)> {
        match self {
            Container::Wav => wav::read(r),
            Container::Au => au::read(&mut r),
        }
    }

    /// Writes sample bytes laid out as [`Container::storage_format`].
    pub fn write(&self, file: &mut File, data: &[u8], format: &FormatDescriptor) -> Result<()> {
        let mut w = BufWriter::new(file);
        match self {
            Container::Wav => wav::write(&mut w, data, format),
            Container::Au => au::write(&mut w, data, format),
        }?;
        w.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        Ok(())
    }

    pub(crate) fn open(&self, file: File) -> Result<(Vec<u8>, FormatDescriptor)> {
        self.read(BufReader::new(file))
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
