pub mod grayscale;
pub mod mode;
pub mod sobel;

pub use mode::ModeCell;
pub use mode::ProcessingMode;

use crate::capture::Frame;
use crate::error::ProcessError;
use crate::pipeline::BufferPool;

/// Apply the selected transform to one raw frame.
///
/// Passthrough hands the input back untouched; the other modes allocate a
/// fresh output buffer of the matching channel count. The pool recycles the
/// intensity scratch the edge map needs each tick.
pub fn dispatch(
    mode: ProcessingMode,
    frame: Frame,
    edge_threshold: f32,
    pool: &BufferPool,
) -> Result<Frame, ProcessError> {
    match mode {
        ProcessingMode::Passthrough => Ok(frame),
        ProcessingMode::Grayscale => grayscale::intensity(&frame),
        ProcessingMode::EdgeDetect => {
            let mut gray = pool.take();
            let result = sobel::edge_map_with_scratch(&frame, edge_threshold, &mut gray);
            pool.put(gray);
            result
        }
    }
}
