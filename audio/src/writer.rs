//! Saving samples to container files.

use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::container::Container;
use crate::error::{Error, Result};
use crate::pcm::{self, FormatDescriptor};

/// Encodes `samples` in the canonical format and saves them to `path`.
///
/// The container is chosen by extension (`.wav` or `.au`, any case). Data is
/// written to a temporary file in the destination directory and renamed into
/// place, so a failed save never leaves a partial file at `path`.
pub fn save(samples: &[f64], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let container = Container::from_path(path)?;
    let format = container.storage_format(&FormatDescriptor::CANONICAL);
    let data = pcm::encode(samples, &format);

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    container.write(tmp.as_file_mut(), &data, &format)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    debug!(
        path = %path.display(),
        %container,
        samples = samples.len(),
        "saved audio"
    );
    Ok(())
}
