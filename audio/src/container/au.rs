//! Sun/NeXT AU container.
//!
//! All header fields are big-endian `u32`s:
//! magic, data offset, data size, encoding, sample rate, channels.
//! Linear PCM in AU is always signed and big-endian.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::pcm::FormatDescriptor;

const MAGIC: &[u8; 4] = b".snd";
const HEADER_SIZE: u32 = 24;
const UNKNOWN_SIZE: u32 = 0xFFFF_FFFF;

const ENCODING_LINEAR_8: u32 = 2;
const ENCODING_LINEAR_16: u32 = 3;

/// Returns the AU storage layout for samples of the given shape.
pub fn storage_format(format: &FormatDescriptor) -> FormatDescriptor {
    format.with_endianness(false)
}

/// Reads an AU stream, returning the sample bytes and their format.
pub fn read<R: Read>(r: &mut R) -> Result<(Vec<u8>, FormatDescriptor)> {
    let mut file = Vec::new();
    r.read_to_end(&mut file)?;

    if file.len() < HEADER_SIZE as usize {
        return Err(Error::Format("au: header truncated".into()));
    }
    if &file[0..4] != MAGIC {
        return Err(Error::Format("au: bad magic".into()));
    }

    let field = |i: usize| u32::from_be_bytes([file[i], file[i + 1], file[i + 2], file[i + 3]]);
    let offset = field(4);
    let size = field(8);
    let encoding = field(12);
    let sample_rate = field(16);
    let channels = field(20);

    let bit_depth = match encoding {
        ENCODING_LINEAR_8 => 8,
        ENCODING_LINEAR_16 => 16,
        other => {
            return Err(Error::Format(format!(
                "au: unsupported encoding {other}, expected linear PCM"
            )));
        }
    };
    let channels = u16::try_from(channels)
        .map_err(|_| Error::Format(format!("au: invalid channel count {channels}")))?;
    let format = FormatDescriptor::new(sample_rate, bit_depth, channels, true, false)?;

    let start = offset as usize;
    if offset < HEADER_SIZE || start > file.len() {
        return Err(Error::Format(format!("au: invalid data offset {offset}")));
    }
    let end = if size == UNKNOWN_SIZE {
        file.len()
    } else {
        let end = start + size as usize;
        if end > file.len() {
            return Err(Error::Format(format!(
                "au: data truncated, header declares {size} bytes, found {}",
                file.len() - start
            )));
        }
        end
    };

    Ok((file[start..end].to_vec(), format))
}

/// Writes `data` as an AU stream. `format` must be big-endian and signed.
pub fn write<W: Write>(w: &mut W, data: &[u8], format: &FormatDescriptor) -> Result<()> {
    if format.is_little_endian() || !format.is_signed() {
        return Err(Error::Format(
            "au: linear PCM must be signed big-endian".into(),
        ));
    }
    let size = u32::try_from(data.len())
        .ok()
        .filter(|&n| n != UNKNOWN_SIZE)
        .ok_or_else(|| Error::Format("au: data too large".into()))?;
    let encoding = match format.bit_depth() {
        8 => ENCODING_LINEAR_8,
        _ => ENCODING_LINEAR_16,
    };

    let mut header = Vec::with_capacity(HEADER_SIZE as usize);
    header.extend_from_slice(MAGIC);
    for value in [
        HEADER_SIZE,
        size,
        encoding,
        format.sample_rate(),
        format.channels() as u32,
    ] {
        header.extend_from_slice(&value.to_be_bytes());
    }

    w.write_all(&header)?;
    w.write_all(data)?;
    w.flush().map_err(Error::from)
}
