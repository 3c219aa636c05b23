//! Annotation consumer.
//!
//! Draws a vertical marker at the split column onto a copy of the frame.
//! The analyzed frame is never mutated; clean frames come back as an
//! unmarked copy.

use image::{Rgb, RgbImage};

use crate::detect::SplitReport;
use crate::frame::Frame;

const MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const MARKER_WIDTH: u32 = 2;

/// Render a copy of `frame`, overlaying the split marker when the report
/// is corrupt.
pub fn annotate(frame: &Frame, report: &SplitReport) -> RgbImage {
    let mut out = to_image(frame);
    if !report.is_corrupt {
        return out;
    }
    for dx in 0..MARKER_WIDTH {
        let x = report.split_column + dx;
        if x >= frame.width() {
            break;
        }
        for y in 0..frame.height() {
            out.put_pixel(x, y, MARKER_COLOR);
        }
    }
    out
}

/// Copy frame pixels into an `image` raster for encoding.
pub fn to_image(frame: &Frame) -> RgbImage {
    RgbImage::from_raw(frame.width(), frame.height(), frame.as_raw().to_vec())
        .expect("frame buffer length is validated at construction")
}
