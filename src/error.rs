//! Error taxonomy for the pipeline.
//!
//! Acquisition failures surface to the caller at start time; everything that
//! can go wrong per-frame is fatal to that tick only and never tears down a
//! running session.

use thiserror::Error;

/// Camera collaborator failures.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("capture stream not started")]
    NotStarted,

    #[error("frame read failed: {0}")]
    ReadFailed(String),
}

/// Per-frame processing failures.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("frame buffer length {actual} does not match {width}x{height}x{channels}")]
    MalformedFrame {
        width: u32,
        height: u32,
        channels: u32,
        actual: usize,
    },
}

/// Display collaborator failures.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("display sink disconnected")]
    Disconnected,
}

/// Stream lifecycle failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to acquire frame source")]
    Acquisition(#[from] CaptureError),
}
