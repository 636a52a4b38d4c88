//! Reusable scratch buffers for per-frame intermediates.

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::queue::ArrayQueue;
use crossbeam::utils::CachePadded;

/// Lock-free pool of byte buffers recycled across ticks, so the intensity
/// plane is not reallocated at frame rate.
pub struct BufferPool {
    queue: ArrayQueue<Vec<u8>>,

    /// Statistics
    stats: CachePadded<Stats>,
}

#[derive(Default)]
struct Stats {
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl BufferPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: ArrayQueue::new(capacity),
            stats: CachePadded::new(Stats::default()),
        }
    }

    /// Take a cleared buffer, allocating only when the pool is cold.
    pub fn take(&self) -> Vec<u8> {
        match self.queue.pop() {
            Some(mut buf) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                buf.clear();
                buf
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                Vec::new()
            }
        }
    }

    /// Return a buffer for reuse. Silently dropped when the pool is full.
    pub fn put(&self, buf: Vec<u8>) {
        let _ = self.queue.push(buf);
    }

    pub fn stats(&self) -> (usize, usize) {
        (
            self.stats.hits.load(Ordering::Relaxed),
            self.stats.misses.load(Ordering::Relaxed),
        )
    }
}
