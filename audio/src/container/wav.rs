//! RIFF/WAVE container, backed by `hound`.
//!
//! WAVE stores PCM little-endian; 8-bit samples are unsigned, wider ones
//! signed.

use std::io::{self, Read, Seek, Write};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{Error, Result};
use crate::pcm::FormatDescriptor;

/// Returns the WAVE storage layout for samples of the given shape.
pub fn storage_format(format: &FormatDescriptor) -> FormatDescriptor {
    format
        .with_signedness(format.bit_depth() > 8)
        .with_endianness(true)
}

/// Reads a WAVE stream, returning the sample bytes and their format.
pub fn read<R: Read>(r: R) -> Result<(Vec<u8>, FormatDescriptor)> {
    let reader = WavReader::new(r)?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int {
        return Err(Error::Format("wav: floating point samples are not PCM".into()));
    }
    let format = FormatDescriptor::new(
        spec.sample_rate,
        spec.bits_per_sample,
        spec.channels,
        spec.bits_per_sample > 8,
        true,
    )?;

    let declared = reader.len() as usize * format.frame_size();
    let mut data = Vec::with_capacity(declared);
    // hound hands out 8-bit samples re-centered on zero.
    for sample in reader.into_samples::<i16>() {
        let sample = sample.map_err(|e| sample_error(e, declared, data.len()))?;
        match format.bit_depth() {
            8 => data.push((sample + 128) as u8),
            _ => data.extend_from_slice(&sample.to_le_bytes()),
        }
    }
    Ok((data, format))
}

/// A short read inside the data chunk means the header overstates the data.
fn sample_error(err: hound::Error, declared: usize, found: usize) -> Error {
    match err {
        hound::Error::IoError(e)
            if matches!(e.kind(), io::ErrorKind::UnexpectedEof | io::ErrorKind::Other) =>
        {
            Error::Format(format!(
                "wav: data truncated, header declares {declared} bytes, found {found}"
            ))
        }
        other => other.into(),
    }
}

/// Writes `data` as a WAVE stream. `format` must match [`storage_format`].
pub fn write<W: Write + Seek>(w: W, data: &[u8], format: &FormatDescriptor) -> Result<()> {
    if *format != storage_format(format) {
        return Err(Error::Format(format!(
            "wav: {}-bit PCM must be little-endian and {}",
            format.bit_depth(),
            if format.bit_depth() > 8 { "signed" } else { "unsigned" }
        )));
    }

    let spec = WavSpec {
        channels: format.channels(),
        sample_rate: format.sample_rate(),
        bits_per_sample: format.bit_depth(),
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::new(w, spec)?;
    match format.bit_depth() {
        8 => {
            for &b in data {
                writer.write_sample((b as i16 - 128) as i8)?;
            }
        }
        _ => {
            for frame in data.chunks_exact(2) {
                writer.write_sample(i16::from_le_bytes([frame[0], frame[1]]))?;
            }
        }
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn write_to_vec(data: &[u8], format: &FormatDescriptor) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        write(&mut cursor, data, format).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_write_then_read_16() {
        let format = FormatDescriptor::CANONICAL;
        let data = vec![0x00, 0x40, 0x00, 0xC0, 0xFF, 0x7F];
        let file = write_to_vec(&data, &format);
        assert_eq!(&file[0..4], b"RIFF");
        assert_eq!(&file[8..12], b"WAVE");
        assert_eq!(file.len(), 44 + data.len());

        let (got, got_format) = read(Cursor::new(file)).unwrap();
        assert_eq!(got, data);
        assert_eq!(got_format, format);
    }

    #[test]
    fn test_write_then_read_8() {
        let format = FormatDescriptor::new(8000, 8, 1, false, true).unwrap();
        let data = vec![0, 128, 255, 64];
        let (got, got_format) = read(Cursor::new(write_to_vec(&data, &format))).unwrap();
        assert_eq!(got, data);
        assert!(!got_format.is_signed());
        assert_eq!(got_format.sample_rate(), 8000);
    }

    #[test]
    fn test_write_rejects_big_endian() {
        let mut cursor = Cursor::new(Vec::new());
        let format = FormatDescriptor::CANONICAL.with_endianness(false);
        assert!(matches!(
            write(&mut cursor, &[0, 0], &format),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_read_rejects_stereo() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.write_sample(0i16).unwrap();
        writer.finalize().unwrap();

        let err = read(Cursor::new(cursor.into_inner()));
        assert!(matches!(err, Err(Error::Format(_))));
    }

    #[test]
    fn test_read_rejects_float() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        writer.write_sample(0.5f32).unwrap();
        writer.finalize().unwrap();

        let err = read(Cursor::new(cursor.into_inner()));
        assert!(matches!(err, Err(Error::Format(_))));
    }

    #[test]
    fn test_read_truncated_data() {
        let data = [0x00u8, 0x40].repeat(100);
        let mut file = write_to_vec(&data, &FormatDescriptor::CANONICAL);
        file.truncate(file.len() - 51);
        match read(Cursor::new(file)) {
            Err(Error::Format(msg)) => assert!(msg.contains("truncated"), "{msg}"),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_rejects_garbage() {
        let err = read(Cursor::new(b"not a wave file at all".to_vec()));
        assert!(matches!(err, Err(Error::Format(_))));
    }
}
