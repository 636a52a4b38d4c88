use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::error::ProcessError;

/// Frame data with zero-copy semantics
#[derive(Clone)]
pub struct Frame {
    /// Immutable pixel data - can be shared across stages without copying
    pub data: Bytes,

    /// Frame metadata
    pub meta: Arc<FrameMetadata>,

    /// Capture timestamp for latency tracking
    pub timestamp: Instant,
}

/// Frame metadata
#[derive(Debug, Clone)]
pub struct FrameMetadata {
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

/// Pixel formats flowing through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Rgba8,
    Rgb24,
    Gray8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Gray8 => 1,
        }
    }
}

impl Frame {
    pub fn new(data: Bytes, sequence: u64, width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            data,
            meta: Arc::new(FrameMetadata {
                sequence,
                width,
                height,
                format,
            }),
            timestamp: Instant::now(),
        }
    }

    /// Derive a transformed frame, carrying geometry and sequence forward.
    pub fn derived(&self, data: Bytes, format: PixelFormat) -> Self {
        Self {
            data,
            meta: Arc::new(FrameMetadata {
                sequence: self.meta.sequence,
                width: self.meta.width,
                height: self.meta.height,
                format,
            }),
            timestamp: self.timestamp,
        }
    }

    pub fn width(&self) -> u32 {
        self.meta.width
    }

    pub fn height(&self) -> u32 {
        self.meta.height
    }

    pub fn format(&self) -> PixelFormat {
        self.meta.format
    }

    /// Buffer length implied by the frame geometry.
    pub fn expected_len(&self) -> usize {
        self.meta.width as usize * self.meta.height as usize * self.meta.format.bytes_per_pixel()
    }

    /// Check the width x height x channels length invariant.
    pub fn validate(&self) -> Result<(), ProcessError> {
        if self.data.len() != self.expected_len() {
            return Err(ProcessError::MalformedFrame {
                width: self.meta.width,
                height: self.meta.height,
                channels: self.meta.format.bytes_per_pixel() as u32,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Bounds-checked access to one channel sample.
    pub fn sample(&self, x: u32, y: u32, channel: usize) -> Option<u8> {
        let bpp = self.meta.format.bytes_per_pixel();
        if x >= self.meta.width || y >= self.meta.height || channel >= bpp {
            return None;
        }
        let idx = (y as usize * self.meta.width as usize + x as usize) * bpp + channel;
        self.data.get(idx).copied()
    }
}
