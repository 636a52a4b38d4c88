pub mod frame;
pub mod synthetic;

pub use frame::Frame;
pub use frame::FrameMetadata;
pub use frame::PixelFormat;
pub use synthetic::TestPatternSource;

use crate::error::CaptureError;

/// Camera collaborator: supplies raw frames on demand.
///
/// Geometry is fixed for the lifetime of one open/close cycle; it may differ
/// between sessions.
pub trait FrameSource: Send + 'static {
    /// Acquire the device. Fails synchronously when the stream is
    /// unavailable (permission refused, hardware absent).
    fn open(&mut self) -> Result<(), CaptureError>;

    /// Fetch the next raw frame.
    fn capture_frame(&mut self) -> Result<Frame, CaptureError>;

    /// Release the device. Idempotent.
    fn close(&mut self);
}
