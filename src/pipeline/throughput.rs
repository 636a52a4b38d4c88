//! Frames-per-second accounting.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts frames between one-second reports.
///
/// The increment and the read-and-reset are both single atomic operations on
/// the same counter, so no tick is lost or double-counted across a report
/// boundary.
#[derive(Debug, Default)]
pub struct ThroughputCounter {
    frames: AtomicU64,
    last_rate: AtomicU64,
}

impl ThroughputCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one processed frame.
    pub fn record_frame(&self) {
        self.frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Read and reset the interval counter, publishing it as the current rate.
    pub fn take_rate(&self) -> u64 {
        let rate = self.frames.swap(0, Ordering::Relaxed);
        self.last_rate.store(rate, Ordering::Relaxed);
        rate
    }

    /// Frames counted in the last reported interval.
    pub fn rate(&self) -> u64 {
        self.last_rate.load(Ordering::Relaxed)
    }

    /// Zero both the interval counter and the published rate.
    pub fn reset(&self) {
        self.frames.store(0, Ordering::Relaxed);
        self.last_rate.store(0, Ordering::Relaxed);
    }
}
