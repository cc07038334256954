//! Blocking playback sink.

use std::path::Path;
use std::time::Instant;

use parking_lot::{Mutex, MutexGuard, const_mutex};
use tracing::{debug, warn};

use super::device::{OutputDevice, OutputLine};
use super::{DefaultDevice, default_device};
use crate::error::{Error, Result};
use crate::pcm::{self, FormatDescriptor};
use crate::source::{self, Clip};
use crate::tone;

/// Guards the single output line of this process.
static LINE: Mutex<()> = const_mutex(());

/// Frames handed to the device per write.
const CHUNK_FRAMES: usize = 4096;

/// What a play call does when another call already holds the output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyPolicy {
    /// Block until the line is free.
    #[default]
    Wait,
    /// Return [`Error::DeviceBusy`] immediately.
    FailFast,
}

/// Plays audio on an output device, blocking until it has been heard.
#[derive(Debug, Clone)]
pub struct PlaybackSink<D = DefaultDevice> {
    device: D,
    policy: BusyPolicy,
}

impl Default for PlaybackSink<DefaultDevice> {
    fn default() -> Self {
        Self::new(default_device())
    }
}

impl<D: OutputDevice> PlaybackSink<D> {
    /// Creates a sink that waits for a busy line.
    pub fn new(device: D) -> Self {
        Self {
            device,
            policy: BusyPolicy::Wait,
        }
    }

    /// Sets the busy policy.
    pub fn with_policy(mut self, policy: BusyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> BusyPolicy {
        self.policy
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Encodes `samples` in the canonical format and plays them.
    ///
    /// Returns once the device has drained, so the call lasts about as long
    /// as the audio.
    pub fn play_blocking(&self, samples: &[f64]) -> Result<()> {
        let format = FormatDescriptor::CANONICAL;
        self.play_bytes_blocking(&pcm::encode(samples, &format), &format)
    }

    /// Plays raw bytes laid out as `format` without re-encoding.
    ///
    /// A trailing partial frame is ignored. An empty buffer returns without
    /// opening a line.
    pub fn play_bytes_blocking(&self, data: &[u8], format: &FormatDescriptor) -> Result<()> {
        let frame_size = format.frame_size();
        let frames = data.len() / frame_size;
        if frames == 0 {
            return Ok(());
        }
        let data = &data[..frames * frame_size];

        let mut handle = self.acquire(format)?;
        debug!(
            frames,
            duration = ?format.duration(data.len() as u64),
            "playing"
        );
        for chunk in data.chunks(CHUNK_FRAMES * frame_size) {
            handle.line.write(chunk)?;
        }
        handle.finish()
    }

    /// Plays a loaded clip in its own format.
    pub fn play_clip(&self, clip: &Clip) -> Result<()> {
        self.play_bytes_blocking(&clip.data, &clip.format)
    }

    /// Loads a `.wav` or `.au` file and plays it.
    pub fn play_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let clip = source::load(path)?;
        self.play_clip(&clip)
    }

    /// Plays the major scale on `root_hz`, one second per note.
    pub fn play_scale(&self, root_hz: f64) -> Result<()> {
        let sample_rate = FormatDescriptor::CANONICAL.sample_rate();
        for note in tone::major_scale(sample_rate, root_hz)? {
            self.play_blocking(&note)?;
        }
        Ok(())
    }

    fn acquire(&self, format: &FormatDescriptor) -> Result<PlaybackHandle> {
        let guard = match self.policy {
            BusyPolicy::Wait => LINE.lock(),
            BusyPolicy::FailFast => LINE.try_lock().ok_or(Error::DeviceBusy)?,
        };
        let line = self.device.open(format)?;
        debug!(
            sample_rate = format.sample_rate(),
            bit_depth = format.bit_depth(),
            "output line opened"
        );
        Ok(PlaybackHandle {
            line,
            closed: false,
            opened: Instant::now(),
            _guard: guard,
        })
    }
}

/// An open output line; exists only for the duration of one play call.
///
/// Dropping an unfinished handle closes the line without draining. The
/// process-wide guard is released after the line.
struct PlaybackHandle {
    line: Box<dyn OutputLine>,
    closed: bool,
    opened: Instant,
    _guard: MutexGuard<'static, ()>,
}

impl PlaybackHandle {
    /// Drains and closes the line.
    fn finish(mut self) -> Result<()> {
        let drained = self.line.drain();
        self.closed = true;
        let closed = self.line.close();
        debug!(elapsed = ?self.opened.elapsed(), "output line closed");
        drained.and(closed)
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(err) = self.line.close() {
            warn!(%err, "failed to close output line");
        }
    }
}
