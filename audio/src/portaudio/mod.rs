//! Audio playback via PortAudio.
//!
//! - Blocking I/O model: `Pa_WriteStream` blocks while the device buffer is full
//! - Draining maps to `Pa_StopStream`, which returns after queued audio has played
//! - 16-bit samples are handed over as native-endian `paInt16`, 8-bit as
//!   `paInt8` or `paUInt8`

pub(crate) mod ffi;

use std::ffi::CStr;
use std::os::raw::{c_ulong, c_void};
use std::ptr;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::{Error, Result};
use crate::pcm::FormatDescriptor;
use crate::playback::{OutputDevice, OutputLine};

static INIT: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Initializes PortAudio once per process.
fn initialize() -> Result<()> {
    INIT.get_or_init(|| {
        let err = unsafe { ffi::Pa_Initialize() };
        if err == ffi::PA_NO_ERROR {
            Ok(())
        } else {
            Err(pa_error_string(err))
        }
    })
    .clone()
    .map_err(Error::Device)
}

fn pa_error_string(code: ffi::PaError) -> String {
    unsafe {
        let ptr = ffi::Pa_GetErrorText(code);
        if ptr.is_null() {
            return format!("portaudio error {}", code);
        }
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

fn pa_check(code: ffi::PaError) -> Result<()> {
    if code == ffi::PA_NO_ERROR {
        Ok(())
    } else {
        Err(Error::Device(pa_error_string(code)))
    }
}

/// The system default output device.
#[derive(Debug, Clone, Copy)]
pub struct PortAudioDevice {
    frames_per_buffer: usize,
}

impl PortAudioDevice {
    /// Sets the host buffer size in frames.
    pub fn with_frames_per_buffer(mut self, frames: usize) -> Self {
        self.frames_per_buffer = frames;
        self
    }
}

impl Default for PortAudioDevice {
    fn default() -> Self {
        Self {
            frames_per_buffer: 1024,
        }
    }
}

impl OutputDevice for PortAudioDevice {
    fn open(&self, format: &FormatDescriptor) -> Result<Box<dyn OutputLine>> {
        initialize()?;

        let device = unsafe { ffi::Pa_GetDefaultOutputDevice() };
        if device == ffi::PA_NO_DEVICE {
            return Err(Error::Device("no default output device".into()));
        }
        let info = unsafe { ffi::Pa_GetDeviceInfo(device) };
        if info.is_null() {
            return Err(Error::Device("failed to get output device info".into()));
        }
        let (name, latency) = unsafe {
            (
                CStr::from_ptr((*info).name).to_string_lossy().into_owned(),
                (*info).default_low_output_latency,
            )
        };

        let params = ffi::PaStreamParameters {
            device,
            channel_count: format.channels() as std::os::raw::c_int,
            sample_format: sample_format(format),
            suggested_latency: latency,
            host_api_specific_stream_info: ptr::null_mut(),
        };

        let mut stream: *mut c_void = ptr::null_mut();
        pa_check(unsafe {
            ffi::Pa_OpenStream(
                &mut stream,
                ptr::null(),
                &params,
                format.sample_rate() as f64,
                self.frames_per_buffer as c_ulong,
                ffi::PA_CLIP_OFF,
                ptr::null(),
                ptr::null_mut(),
            )
        })?;

        let mut line = PortAudioLine {
            stream,
            format: *format,
            stopped: true,
            closed: false,
        };
        // `line` closes the stream on drop if starting fails.
        pa_check(unsafe { ffi::Pa_StartStream(stream) })?;
        line.stopped = false;

        debug!(device = %name, "portaudio stream started");
        Ok(Box::new(line))
    }
}

fn sample_format(format: &FormatDescriptor) -> ffi::PaSampleFormat {
    match (format.bit_depth(), format.is_signed()) {
        (8, true) => ffi::PA_INT8,
        (8, false) => ffi::PA_UINT8,
        _ => ffi::PA_INT16,
    }
}

/// Converts 16-bit frames of any declared layout to native signed samples.
fn to_native_i16(data: &[u8], format: &FormatDescriptor) -> Vec<i16> {
    data.chunks_exact(2)
        .map(|b| {
            let raw = if format.is_little_endian() {
                u16::from_le_bytes([b[0], b[1]])
            } else {
                u16::from_be_bytes([b[0], b[1]])
            };
            if format.is_signed() {
                raw as i16
            } else {
                (raw ^ 0x8000) as i16
            }
        })
        .collect()
}

/// An open PortAudio output stream.
struct PortAudioLine {
    stream: *mut c_void,
    format: FormatDescriptor,
    stopped: bool,
    closed: bool,
}

// The stream pointer is owned exclusively by this line and only used from
// the thread holding the playback lock.
unsafe impl Send for PortAudioLine {}

impl PortAudioLine {
    fn write_frames(&self, buffer: *const c_void, frames: usize) -> Result<()> {
        let err = unsafe { ffi::Pa_WriteStream(self.stream, buffer, frames as c_ulong) };
        if err == ffi::PA_OUTPUT_UNDERFLOWED {
            debug!("portaudio output underflowed");
            return Ok(());
        }
        pa_check(err)
    }
}

impl OutputLine for PortAudioLine {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        if self.closed {
            return Err(Error::Device("stream closed".into()));
        }
        match self.format.bit_depth() {
            8 => self.write_frames(data.as_ptr() as *const c_void, data.len()),
            _ => {
                let samples = to_native_i16(data, &self.format);
                self.write_frames(samples.as_ptr() as *const c_void, samples.len())
            }
        }
    }

    fn drain(&mut self) -> Result<()> {
        if self.closed || self.stopped {
            return Ok(());
        }
        self.stopped = true;
        pa_check(unsafe { ffi::Pa_StopStream(self.stream) })
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        pa_check(unsafe { ffi::Pa_CloseStream(self.stream) })
    }
}

impl Drop for PortAudioLine {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
