//! Sobel gradient magnitude with a fixed binary threshold.

use bytes::Bytes;

use crate::capture::frame::{Frame, PixelFormat};
use crate::error::ProcessError;
use crate::process::grayscale;

/// Default threshold on gradient magnitude.
pub const DEFAULT_THRESHOLD: f32 = 50.0;

const KX: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
const KY: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

/// Binary edge map of a color frame.
///
/// The input is reduced to intensity first. Interior pixels whose gradient
/// magnitude is strictly above `threshold` come out white; everything else,
/// including the one-pixel border the kernel never reaches, stays black.
/// Output is always RGBA with full alpha, same geometry as the input.
pub fn edge_map(frame: &Frame, threshold: f32) -> Result<Frame, ProcessError> {
    let mut gray = Vec::new();
    edge_map_with_scratch(frame, threshold, &mut gray)
}

/// Same as [`edge_map`] but reuses caller-owned scratch for the intensity
/// plane, so nothing is reallocated at frame rate.
pub fn edge_map_with_scratch(
    frame: &Frame,
    threshold: f32,
    gray: &mut Vec<u8>,
) -> Result<Frame, ProcessError> {
    frame.validate()?;
    grayscale::intensity_into(frame, gray);
    let out = threshold_gradient(gray, frame.width(), frame.height(), threshold);
    Ok(frame.derived(Bytes::from(out), PixelFormat::Rgba8))
}

fn threshold_gradient(gray: &[u8], width: u32, height: u32, threshold: f32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;

    let mut out = vec![0u8; w * h * 4];
    for px in out.chunks_exact_mut(4) {
        px[3] = 255;
    }

    // Frames too small to hold an interior pixel stay entirely at the
    // black border default.
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut gx = 0i32;
            let mut gy = 0i32;
            for ky in 0..3 {
                for kx in 0..3 {
                    let v = gray[(y + ky - 1) * w + (x + kx - 1)] as i32;
                    gx += v * KX[ky * 3 + kx];
                    gy += v * KY[ky * 3 + kx];
                }
            }

            let magnitude = ((gx * gx + gy * gy) as f32).sqrt();
            let v = if magnitude > threshold { 255 } else { 0 };

            let i = (y * w + x) * 4;
            out[i] = v;
            out[i + 1] = v;
            out[i + 2] = v;
        }
    }

    out
}
