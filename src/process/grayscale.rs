//! Unweighted RGB-average grayscale reduction.

use bytes::Bytes;

use crate::capture::frame::{Frame, PixelFormat};
use crate::error::ProcessError;

/// Reduce a color frame to a single-channel intensity buffer.
///
/// Intensity is the truncating integer mean (R + G + B) / 3 - deliberately
/// not a luma-weighted formula. Alpha is dropped. A Gray8 input maps every
/// sample to itself, and a zero-area frame yields a zero-length buffer.
pub fn intensity(frame: &Frame) -> Result<Frame, ProcessError> {
    frame.validate()?;
    let mut out = Vec::new();
    intensity_into(frame, &mut out);
    Ok(frame.derived(Bytes::from(out), PixelFormat::Gray8))
}

/// Write the intensity plane for `frame` into `out`, reusing its allocation.
pub(crate) fn intensity_into(frame: &Frame, out: &mut Vec<u8>) {
    out.clear();
    out.reserve(frame.width() as usize * frame.height() as usize);

    match frame.format() {
        PixelFormat::Gray8 => out.extend_from_slice(&frame.data),
        PixelFormat::Rgb24 => {
            for px in frame.data.chunks_exact(3) {
                out.push(mean(px[0], px[1], px[2]));
            }
        }
        PixelFormat::Rgba8 => {
            for px in frame.data.chunks_exact(4) {
                out.push(mean(px[0], px[1], px[2]));
            }
        }
    }
}

fn mean(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}
