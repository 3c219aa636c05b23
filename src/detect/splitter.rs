//! Interior-band split scan.
//!
//! The scan walks the frame once in row-major order, accumulating each band
//! column's color-distance sum while the row is hot, then recomputes the
//! per-row profile for the winning column only.

use std::time::Instant;

use crate::frame::{Frame, CHANNELS};

use super::error::SplitError;
use super::params::SplitParams;
use super::result::SplitReport;

/// Vertical split detector.
///
/// Stateless and re-entrant: `detect` borrows the frame read-only and each
/// call is independent, so one detector may serve concurrent callers on
/// distinct frames.
#[derive(Clone, Debug, Default)]
pub struct SplitDetector {
    params: SplitParams,
}

impl SplitDetector {
    /// Create a detector, rejecting out-of-range thresholds up front.
    pub fn new(params: SplitParams) -> Result<Self, SplitError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SplitParams {
        &self.params
    }

    /// Classify one frame.
    pub fn detect(&self, frame: &Frame) -> Result<SplitReport, SplitError> {
        self.detect_observed(frame, |_, _| {})
    }

    /// Classify one frame and hand the report plus the winning column's
    /// per-row profile to `observe` before returning.
    ///
    /// The observer is a one-way hand-off for diagnostics consumers; it
    /// cannot influence the decision.
    pub fn detect_observed(
        &self,
        frame: &Frame,
        observe: impl FnOnce(&SplitReport, &[f64]),
    ) -> Result<SplitReport, SplitError> {
        let start = Instant::now();
        let band = self.params.search_band(frame.width(), frame.height())?;

        let height = frame.height() as usize;
        let band_start = band.start as usize;
        let band_len = band.len() as usize;

        // Row-major pass: frame data is row-major, so per-column sums are
        // accumulated one row stripe at a time.
        let mut sums = vec![0.0f64; band_len];
        for y in 0..frame.height() {
            let row = frame.row(y);
            for (i, sum) in sums.iter_mut().enumerate() {
                let off = (band_start + i) * CHANNELS;
                *sum += sample_distance(
                    &row[off..off + CHANNELS],
                    &row[off + CHANNELS..off + 2 * CHANNELS],
                );
            }
        }

        // Strict greater-than keeps the lowest column index on ties.
        let mut best_index = 0usize;
        let mut best_sum = sums[0];
        for (i, &sum) in sums.iter().enumerate().skip(1) {
            if sum > best_sum {
                best_sum = sum;
                best_index = i;
            }
        }

        let split_column = (band_start + best_index) as u32;
        let max_mean_diff = best_sum / height as f64;

        let profile = column_profile(frame, split_column);
        let affected = profile
            .iter()
            .filter(|&&diff| diff >= self.params.row_threshold)
            .count();
        let row_ratio = affected as f64 / height as f64;

        let is_corrupt = max_mean_diff > self.params.diff_threshold
            && row_ratio >= self.params.row_ratio_threshold;

        let report = SplitReport {
            is_corrupt,
            split_column,
            max_mean_diff,
            row_ratio,
            elapsed: start.elapsed(),
        };
        observe(&report, &profile);
        Ok(report)
    }
}

/// Per-row Euclidean RGB distance between column `x` and column `x + 1`.
///
/// # Panics
///
/// Panics if `x + 1 >= frame.width()`.
pub fn column_profile(frame: &Frame, x: u32) -> Vec<f64> {
    assert!(
        x < frame.width().saturating_sub(1),
        "column {x} has no right neighbor in a frame {} wide",
        frame.width()
    );
    (0..frame.height())
        .map(|y| {
            let row = frame.row(y);
            let off = x as usize * CHANNELS;
            sample_distance(&row[off..off + CHANNELS], &row[off + CHANNELS..off + 2 * CHANNELS])
        })
        .collect()
}

#[inline]
fn sample_distance(a: &[u8], b: &[u8]) -> f64 {
    // Widen before subtracting; u8 arithmetic would wrap.
    let sq: i32 = a
        .iter()
        .zip(b)
        .map(|(&p, &q)| {
            let d = i32::from(p) - i32::from(q);
            d * d
        })
        .sum();
    f64::from(sq).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_distance_widens_before_subtracting() {
        let full = sample_distance(&[0, 0, 0], &[255, 255, 255]);
        assert!((full - (3.0f64 * 255.0 * 255.0).sqrt()).abs() < 1e-9);
        assert_eq!(sample_distance(&[255, 0, 128], &[255, 0, 128]), 0.0);
    }

    #[test]
    fn uniform_frame_scores_zero() {
        let frame = Frame::solid(20, 10, [77, 77, 77]).unwrap();
        let detector = SplitDetector::default();
        let report = detector.detect(&frame).unwrap();
        assert!(!report.is_corrupt);
        assert_eq!(report.max_mean_diff, 0.0);
        assert_eq!(report.row_ratio, 0.0);
    }

    #[test]
    fn profile_matches_pixel_distance() {
        let mut data = vec![0u8; 4 * 2 * 3];
        // Row 1, column 2 gets a distinct color so the (2, 3) boundary is
        // nonzero on that row only.
        let off = (4 + 2) * 3;
        data[off] = 30;
        let frame = Frame::from_rgb(data, 4, 2).unwrap();
        let profile = column_profile(&frame, 2);
        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0], 0.0);
        assert!((profile[1] - 30.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic]
    fn profile_rejects_last_column() {
        let frame = Frame::solid(4, 2, [0, 0, 0]).unwrap();
        column_profile(&frame, 3);
    }
}
