//! Display collaborator: consumes processed frames for presentation.

use flume::TrySendError;

use crate::capture::Frame;
use crate::error::SinkError;

/// Output side of the pipeline. Implementations must tolerate frame
/// geometry changing between sessions, never within one.
pub trait FrameSink: Send + 'static {
    /// Hand one frame over for presentation.
    fn present(&mut self, frame: Frame) -> Result<(), SinkError>;
}

/// Sink backed by a bounded channel to a renderer task.
///
/// A full channel drops the frame on the floor, which is the same
/// backpressure a display refresh cycle applies; it is not an error.
pub struct ChannelSink {
    tx: flume::Sender<Frame>,
}

impl ChannelSink {
    /// Create the sink plus the receiver end for the renderer.
    pub fn bounded(depth: usize) -> (Self, flume::Receiver<Frame>) {
        let (tx, rx) = flume::bounded(depth);
        (Self { tx }, rx)
    }
}

impl FrameSink for ChannelSink {
    fn present(&mut self, frame: Frame) -> Result<(), SinkError> {
        match self.tx.try_send(frame) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Ok(()),
            Err(TrySendError::Disconnected(_)) => Err(SinkError::Disconnected),
        }
    }
}
