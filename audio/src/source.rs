//! Loading PCM audio from container files.

use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::container::Container;
use crate::error::{Error, Result};
use crate::pcm::{self, FormatDescriptor};

/// Raw sample bytes together with the format declared by their container.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub data: Vec<u8>,
    pub format: FormatDescriptor,
}

impl Clip {
    /// Creates a clip from raw bytes laid out as `format`.
    pub fn new(data: Vec<u8>, format: FormatDescriptor) -> Self {
        Self { data, format }
    }

    /// Decodes the clip into normalized samples.
    pub fn samples(&self) -> Vec<f64> {
        pcm::decode(&self.data, &self.format)
    }

    /// Returns the playback duration of the clip.
    pub fn duration(&self) -> Duration {
        self.format.duration(self.data.len() as u64)
    }
}

/// Loads the raw sample bytes and declared format of a `.wav` or `.au` file.
///
/// The extension is checked before the filesystem is touched.
pub fn load(path: impl AsRef<Path>) -> Result<Clip> {
    let path = path.as_ref();
    let container = Container::from_path(path)?;
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    if !file.metadata()?.is_file() {
        return Err(Error::NotFound(format!("{}: not a file", path.display())));
    }
    let (data, format) = container.open(file)?;
    debug!(
        path = %path.display(),
        %container,
        sample_rate = format.sample_rate(),
        bit_depth = format.bit_depth(),
        bytes = data.len(),
        "loaded audio"
    );
    Ok(Clip::new(data, format))
}

/// Loads a file and decodes it into normalized samples.
pub fn read(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    load(path).map(|clip| clip.samples())
}

fn open_error(path: &Path, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            Error::NotFound(format!("{}: {err}", path.display()))
        }
        _ => Error::Io(err),
    }
}
