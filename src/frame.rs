//! Decoded frame model.
//!
//! `Frame` is the only pixel container the detector reads:
//! - Row-major RGB samples, 3 channels per pixel, 8 bits per sample.
//! - Construction validates the buffer length against the dimensions.
//! - Read-only after construction; the detector never writes to it.
//!
//! Decoding files into frames lives in `source`, not here.

use thiserror::Error;

/// Color channels per pixel.
pub const CHANNELS: usize = 3;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame dimensions overflow: {width}x{height}")]
    DimensionsOverflow { width: u32, height: u32 },
    #[error("RGB buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Decoded RGB frame.
///
/// Sample `(x, y, c)` lives at `(y * width + x) * CHANNELS + c`.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    /// Wrap an RGB buffer of length `width * height * 3`.
    pub fn from_rgb(data: Vec<u8>, width: u32, height: u32) -> Result<Self, FrameError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or(FrameError::DimensionsOverflow { width, height })?;
        if data.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Solid-color frame.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, FrameError> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or(FrameError::DimensionsOverflow { width, height })?;
        let mut data = Vec::with_capacity(pixels * CHANNELS);
        for _ in 0..pixels {
            data.extend_from_slice(&rgb);
        }
        Self::from_rgb(data, width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All samples of one row.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// RGB triple at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let off = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.data[off], self.data[off + 1], self.data[off + 2]]
    }

    /// The raw row-major sample buffer.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgb_validates_length() {
        let err = Frame::from_rgb(vec![0u8; 10], 2, 2).unwrap_err();
        match err {
            FrameError::LengthMismatch { expected, actual } => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 10);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pixel_and_row_access() {
        let data = vec![
            1, 2, 3, 4, 5, 6, //
            7, 8, 9, 10, 11, 12,
        ];
        let frame = Frame::from_rgb(data, 2, 2).unwrap();
        assert_eq!(frame.pixel(0, 0), [1, 2, 3]);
        assert_eq!(frame.pixel(1, 0), [4, 5, 6]);
        assert_eq!(frame.pixel(0, 1), [7, 8, 9]);
        assert_eq!(frame.row(1), &[7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn solid_fills_every_pixel() {
        let frame = Frame::solid(3, 2, [9, 8, 7]).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(frame.pixel(x, y), [9, 8, 7]);
            }
        }
    }
}
