//! Synthetic test-pattern source standing in for camera hardware.

use bytes::Bytes;
use tracing::info;

use crate::capture::frame::{Frame, PixelFormat};
use crate::capture::FrameSource;
use crate::error::CaptureError;
use crate::CaptureConfig;

/// Moving-gradient RGBA source at a fixed geometry.
///
/// Each capture shifts the gradient by one step so downstream transforms see
/// changing content at frame rate.
pub struct TestPatternSource {
    config: CaptureConfig,
    sequence: u64,
    opened: bool,
}

impl TestPatternSource {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            sequence: 0,
            opened: false,
        }
    }

    fn render(&self) -> Bytes {
        let w = self.config.width as usize;
        let h = self.config.height as usize;
        let shift = (self.sequence % 256) as u8;

        let mut data = vec![0u8; w * h * 4];
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) * 4;
                data[i] = (x as u8).wrapping_add(shift);
                data[i + 1] = (y as u8).wrapping_add(shift);
                data[i + 2] = shift;
                data[i + 3] = 255;
            }
        }
        Bytes::from(data)
    }
}

impl FrameSource for TestPatternSource {
    fn open(&mut self) -> Result<(), CaptureError> {
        info!(
            "Starting test pattern source: {}x{} @ {} fps",
            self.config.width, self.config.height, self.config.fps
        );
        self.opened = true;
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<Frame, CaptureError> {
        if !self.opened {
            return Err(CaptureError::NotStarted);
        }

        self.sequence += 1;
        Ok(Frame::new(
            self.render(),
            self.sequence,
            self.config.width,
            self.config.height,
            PixelFormat::Rgba8,
        ))
    }

    fn close(&mut self) {
        self.opened = false;
    }
}
