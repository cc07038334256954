//! Concurrent play calls never hold two output lines at once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use ringside_audio::playback::{OutputDevice, OutputLine};
use ringside_audio::{BusyPolicy, Error, FormatDescriptor, PlaybackSink, Result, tone};
use serial_test::serial;

/// Records line open/close pairs and the peak number of open lines.
#[derive(Default)]
struct Ledger {
    active: AtomicUsize,
    peak: AtomicUsize,
    pairs: Mutex<Vec<(usize, usize)>>,
    clock: AtomicUsize,
}

impl Ledger {
    fn tick(&self) -> usize {
        self.clock.fetch_add(1, Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct LedgerDevice {
    ledger: Arc<Ledger>,
    write_delay: Duration,
}

struct LedgerLine {
    ledger: Arc<Ledger>,
    write_delay: Duration,
    opened_at: usize,
}

impl OutputDevice for LedgerDevice {
    fn open(&self, _format: &FormatDescriptor) -> Result<Box<dyn OutputLine>> {
        let now = self.ledger.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.ledger.peak.fetch_max(now, Ordering::SeqCst);
        Ok(Box::new(LedgerLine {
            ledger: self.ledger.clone(),
            write_delay: self.write_delay,
            opened_at: self.ledger.tick(),
        }))
    }
}

impl OutputLine for LedgerLine {
    fn write(&mut self, _data: &[u8]) -> Result<()> {
        thread::sleep(self.write_delay);
        Ok(())
    }

    fn drain(&mut self) -> Result<()> {
        thread::sleep(self.write_delay);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let closed_at = self.ledger.tick();
        self.ledger
            .pairs
            .lock()
            .unwrap()
            .push((self.opened_at, closed_at));
        self.ledger.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

fn device(ledger: &Arc<Ledger>) -> LedgerDevice {
    LedgerDevice {
        ledger: ledger.clone(),
        write_delay: Duration::from_millis(5),
    }
}

#[test]
#[serial]
fn concurrent_plays_serialize() {
    let ledger = Arc::new(Ledger::default());
    let note = tone::note(44100, 440.0, 0.2, 0.5).unwrap();

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let sink = PlaybackSink::new(device(&ledger));
            let note = note.clone();
            thread::spawn(move || sink.play_blocking(&note))
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    assert_eq!(ledger.peak.load(Ordering::SeqCst), 1);
    assert_eq!(ledger.active.load(Ordering::SeqCst), 0);

    let mut pairs = ledger.pairs.lock().unwrap().clone();
    assert_eq!(pairs.len(), 6);
    pairs.sort();
    for (open, close) in &pairs {
        assert_eq!(*close, open + 1, "another line opened inside {open}..{close}");
    }
    for w in pairs.windows(2) {
        assert!(w[0].1 < w[1].0, "lines overlap: {:?} and {:?}", w[0], w[1]);
    }
}

#[test]
#[serial]
fn fail_fast_reports_busy() {
    let ledger = Arc::new(Ledger::default());
    let (opened_tx, opened_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    struct GatedDevice {
        inner: LedgerDevice,
        opened: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    struct GatedLine {
        inner: Box<dyn OutputLine>,
        release: mpsc::Receiver<()>,
    }

    impl OutputDevice for GatedDevice {
        fn open(&self, format: &FormatDescriptor) -> Result<Box<dyn OutputLine>> {
            let inner = self.inner.open(format)?;
            self.opened.lock().unwrap().send(()).unwrap();
            // Hand the receiver to the line; the device is used once.
            let (_, dummy) = mpsc::channel();
            let release = std::mem::replace(&mut *self.release.lock().unwrap(), dummy);
            Ok(Box::new(GatedLine { inner, release }))
        }
    }

    impl OutputLine for GatedLine {
        fn write(&mut self, data: &[u8]) -> Result<()> {
            self.inner.write(data)
        }

        fn drain(&mut self) -> Result<()> {
            let _ = self.release.recv();
            self.inner.drain()
        }

        fn close(&mut self) -> Result<()> {
            self.inner.close()
        }
    }

    let gated = PlaybackSink::new(GatedDevice {
        inner: device(&ledger),
        opened: Mutex::new(opened_tx),
        release: Mutex::new(release_rx),
    });
    let holder = thread::spawn(move || gated.play_blocking(&[0.1; 64]));
    opened_rx.recv().unwrap();

    let impatient = PlaybackSink::new(device(&ledger)).with_policy(BusyPolicy::FailFast);
    assert!(matches!(
        impatient.play_blocking(&[0.1; 64]),
        Err(Error::DeviceBusy)
    ));

    release_tx.send(()).unwrap();
    holder.join().unwrap().unwrap();

    impatient.play_blocking(&[0.1; 64]).unwrap();
    assert_eq!(ledger.peak.load(Ordering::SeqCst), 1);
    assert_eq!(ledger.pairs.lock().unwrap().len(), 2);
}

#[test]
#[serial]
fn playback_blocks_for_drain() {
    let ledger = Arc::new(Ledger::default());
    let sink = PlaybackSink::new(LedgerDevice {
        ledger: ledger.clone(),
        write_delay: Duration::from_millis(30),
    });

    let start = std::time::Instant::now();
    sink.play_blocking(&[0.0; 100]).unwrap();
    // one write plus the drain
    assert!(start.elapsed() >= Duration::from_millis(60));
    assert_eq!(ledger.active.load(Ordering::SeqCst), 0);
}
