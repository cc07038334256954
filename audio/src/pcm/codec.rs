//! Conversion between raw PCM bytes and normalized samples.
//!
//! Samples are `f64` values nominally in `[-1.0, 1.0]`. Integer values are
//! normalized by the magnitude of their range, so a 16-bit sample `v`
//! becomes `v / 32768.0`.

use tracing::warn;

use super::FormatDescriptor;

/// Decodes raw PCM bytes into normalized samples.
///
/// A trailing partial frame is dropped.
pub fn decode(bytes: &[u8], format: &FormatDescriptor) -> Vec<f64> {
    let frames = bytes.chunks_exact(format.frame_size());
    let remainder = frames.remainder().len();
    if remainder > 0 {
        warn!(
            remainder,
            frame_size = format.frame_size(),
            "dropping trailing partial frame"
        );
    }

    let scale = format.full_scale();
    frames
        .map(|frame| read_frame(frame, format) as f64 / scale)
        .collect()
}

/// Encodes normalized samples into raw PCM bytes.
///
/// Each sample is scaled by the integer range magnitude and truncated toward
/// zero. Values beyond the representable range clip to the minimum or
/// maximum integer instead of wrapping; NaN encodes as zero.
pub fn encode(samples: &[f64], format: &FormatDescriptor) -> Vec<u8> {
    let scale = format.full_scale();
    let (min, max) = (-scale, scale - 1.0);

    let mut data = Vec::with_capacity(samples.len() * format.frame_size());
    for &sample in samples {
        let value = (sample * scale).clamp(min, max) as i32;
        write_frame(&mut data, value, format);
    }
    data
}

/// Reads one frame as a signed integer centered on zero.
fn read_frame(frame: &[u8], format: &FormatDescriptor) -> i32 {
    match format.bit_depth() {
        8 => {
            if format.is_signed() {
                frame[0] as i8 as i32
            } else {
                frame[0] as i32 - 128
            }
        }
        _ => {
            let bytes = [frame[0], frame[1]];
            let raw = if format.is_little_endian() {
                u16::from_le_bytes(bytes)
            } else {
                u16::from_be_bytes(bytes)
            };
            if format.is_signed() {
                raw as i16 as i32
            } else {
                raw as i32 - 32768
            }
        }
    }
}

/// Appends one frame for a value already clipped to the format's range.
fn write_frame(data: &mut Vec<u8>, value: i32, format: &FormatDescriptor) {
    match format.bit_depth() {
        8 => {
            let byte = if format.is_signed() {
                value as i8 as u8
            } else {
                (value + 128) as u8
            };
            data.push(byte);
        }
        _ => {
            let raw = if format.is_signed() {
                value as i16 as u16
            } else {
                (value + 32768) as u16
            };
            if format.is_little_endian() {
                data.extend_from_slice(&raw.to_le_bytes());
            } else {
                data.extend_from_slice(&raw.to_be_bytes());
            }
        }
    }
}
