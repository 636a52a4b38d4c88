use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Which transform is applied to each incoming frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingMode {
    Passthrough,
    Grayscale,
    #[default]
    EdgeDetect,
}

/// Shared mode selection.
///
/// Written by the control surface, read once per tick. A store becomes
/// visible to the next processed frame and never touches a frame already
/// mid-transform.
#[derive(Debug)]
pub struct ModeCell(AtomicU8);

impl ModeCell {
    pub fn new(mode: ProcessingMode) -> Self {
        Self(AtomicU8::new(mode as u8))
    }

    pub fn get(&self) -> ProcessingMode {
        match self.0.load(Ordering::Relaxed) {
            0 => ProcessingMode::Passthrough,
            1 => ProcessingMode::Grayscale,
            _ => ProcessingMode::EdgeDetect,
        }
    }

    pub fn set(&self, mode: ProcessingMode) {
        self.0.store(mode as u8, Ordering::Relaxed);
    }
}
