//! Error types for the audio library.

use thiserror::Error;

/// Error type for audio operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Path could not be resolved or read.
    #[error("audio: not found: {0}")]
    NotFound(String),

    /// Unsupported bit depth, channel count or codec, or a malformed header.
    #[error("audio: format error: {0}")]
    Format(String),

    /// File extension is not a supported container.
    #[error("audio: unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Output line could not be opened or configured.
    #[error("audio: device error: {0}")]
    Device(String),

    /// Another playback already holds the output line.
    #[error("audio: device busy")]
    DeviceBusy,

    /// Out-of-range tone generation argument.
    #[error("audio: invalid parameter: {0}")]
    InvalidParameter(String),

    /// IO error after the file was opened.
    #[error("audio: io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => Error::Io(e),
            other => Error::Format(other.to_string()),
        }
    }
}

/// Result type for audio operations.
pub type Result<T> = std::result::Result<T, Error>;
