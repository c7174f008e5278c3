//! Double-buffered diff gate in front of the display device.

#![allow(missing_docs)]

use parking_lot::Mutex;
use tracing::info;

use crate::core::errors::Result;
use crate::display::device::DisplayDevice;
use crate::display::page::Display;

/// What a publish did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Published {
    /// Content differed and the device accepted it.
    Written,
    /// Content matched the last write; the device was not touched.
    Unchanged,
}

#[derive(Debug, Default)]
struct Buffers {
    current: Display,
    last_written: Option<Display>,
    writes: u64,
}

/// Holds the current and last-written displays and writes only on change.
///
/// Compare, write and buffer swap happen under one lock.
#[derive(Debug, Default)]
pub struct DiffGate {
    inner: Mutex<Buffers>,
}

impl DiffGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `display` as current and push it to `device` if it differs from
    /// the last successful write.
    ///
    /// A failed device write leaves the last-written buffer alone so the next
    /// publish retries.
    pub fn publish(&self, display: Display, device: &dyn DisplayDevice) -> Result<Published> {
        let mut buffers = self.inner.lock();
        buffers.current = display;
        if buffers.last_written.as_ref() == Some(&buffers.current) {
            return Ok(Published::Unchanged);
        }

        device.write(&buffers.current)?;
        let written = buffers.current.clone();
        buffers.last_written = Some(written);
        buffers.writes += 1;
        info!(writes = buffers.writes, "display updated");
        Ok(Published::Written)
    }

    /// Forget the last write so the next publish always reaches the device.
    pub fn invalidate(&self) {
        self.inner.lock().last_written = None;
    }

    /// Copy of what the device is currently showing, if anything was written.
    #[must_use]
    pub fn snapshot(&self) -> Option<Display> {
        self.inner.lock().last_written.clone()
    }

    /// Successful device writes so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.inner.lock().writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::EdxError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct Recorder {
        writes: AtomicUsize,
        fail: AtomicBool,
    }

    impl DisplayDevice for Recorder {
        fn write(&self, _display: &Display) -> Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(EdxError::Device {
                    details: "unplugged".to_string(),
                });
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn display(line: &str) -> Display {
        let mut d = Display::new(3);
        d.pages[0].add(line);
        d
    }

    #[test]
    fn identical_content_is_written_once() {
        let gate = DiffGate::new();
        let device = Recorder::default();
        assert_eq!(gate.publish(display("a"), &device).unwrap(), Published::Written);
        assert_eq!(gate.publish(display("a"), &device).unwrap(), Published::Unchanged);
        assert_eq!(device.writes.load(Ordering::SeqCst), 1);
        assert_eq!(gate.write_count(), 1);
    }

    #[test]
    fn changed_content_is_written() {
        let gate = DiffGate::new();
        let device = Recorder::default();
        gate.publish(display("a"), &device).unwrap();
        gate.publish(display("b"), &device).unwrap();
        gate.publish(display("a"), &device).unwrap();
        assert_eq!(device.writes.load(Ordering::SeqCst), 3);
        assert_eq!(gate.snapshot(), Some(display("a")));
    }

    #[test]
    fn first_publish_writes_even_empty_display() {
        let gate = DiffGate::new();
        let device = Recorder::default();
        assert_eq!(gate.publish(Display::new(3), &device).unwrap(), Published::Written);
    }

    #[test]
    fn failed_write_is_retried_next_publish() {
        let gate = DiffGate::new();
        let device = Recorder::default();
        gate.publish(display("a"), &device).unwrap();

        device.fail.store(true, Ordering::SeqCst);
        assert!(gate.publish(display("b"), &device).is_err());
        assert_eq!(gate.snapshot(), Some(display("a")));

        device.fail.store(false, Ordering::SeqCst);
        assert_eq!(gate.publish(display("b"), &device).unwrap(), Published::Written);
        assert_eq!(device.writes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_forces_a_rewrite() {
        let gate = DiffGate::new();
        let device = Recorder::default();
        gate.publish(display("a"), &device).unwrap();
        gate.invalidate();
        assert!(gate.snapshot().is_none());
        assert_eq!(gate.publish(display("a"), &device).unwrap(), Published::Written);
    }
}
