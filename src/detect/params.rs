use super::error::SplitError;

pub const DEFAULT_SEARCH_FRAC: f64 = 0.45;
pub const DEFAULT_DIFF_THRESHOLD: f64 = 25.0;
pub const DEFAULT_ROW_THRESHOLD: f64 = 12.0;
pub const DEFAULT_ROW_RATIO_THRESHOLD: f64 = 0.5;

/// Tunable thresholds for the split scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitParams {
    /// Fraction of the width excluded from each horizontal edge before
    /// searching. Must satisfy `0 <= search_frac < 0.5`.
    pub search_frac: f64,
    /// Minimum mean per-row color distance at the winning column for the
    /// frame to be flagged corrupt.
    pub diff_threshold: f64,
    /// Per-row distance at or above which a row counts as affected.
    pub row_threshold: f64,
    /// Minimum fraction of affected rows, required in addition to the
    /// magnitude check.
    pub row_ratio_threshold: f64,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            search_frac: DEFAULT_SEARCH_FRAC,
            diff_threshold: DEFAULT_DIFF_THRESHOLD,
            row_threshold: DEFAULT_ROW_THRESHOLD,
            row_ratio_threshold: DEFAULT_ROW_RATIO_THRESHOLD,
        }
    }
}

/// Interior column range eligible for the split search, half-open.
///
/// The upper bound never exceeds `width - 1`, so the `x + 1` neighbor of
/// every band column stays inside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchBand {
    pub start: u32,
    pub end: u32,
}

impl SearchBand {
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl SplitParams {
    /// Check the frame-independent preconditions.
    pub fn validate(&self) -> Result<(), SplitError> {
        if !self.search_frac.is_finite() || !(0.0..0.5).contains(&self.search_frac) {
            return Err(SplitError::InvalidParameters(format!(
                "search_frac must be in [0, 0.5), got {}",
                self.search_frac
            )));
        }
        if !self.diff_threshold.is_finite() || self.diff_threshold <= 0.0 {
            return Err(SplitError::InvalidParameters(format!(
                "diff_threshold must be positive, got {}",
                self.diff_threshold
            )));
        }
        if !self.row_threshold.is_finite() || self.row_threshold <= 0.0 {
            return Err(SplitError::InvalidParameters(format!(
                "row_threshold must be positive, got {}",
                self.row_threshold
            )));
        }
        if !self.row_ratio_threshold.is_finite()
            || self.row_ratio_threshold <= 0.0
            || self.row_ratio_threshold > 1.0
        {
            return Err(SplitError::InvalidParameters(format!(
                "row_ratio_threshold must be in (0, 1], got {}",
                self.row_ratio_threshold
            )));
        }
        Ok(())
    }

    /// Resolve the interior band for a frame, rejecting degenerate frames
    /// and bands that round down to nothing.
    pub(crate) fn search_band(&self, width: u32, height: u32) -> Result<SearchBand, SplitError> {
        if height < 1 || width < 2 {
            return Err(SplitError::InvalidParameters(format!(
                "frame must be at least 2 columns by 1 row, got {width}x{height}"
            )));
        }
        let w = f64::from(width);
        let start = (w * self.search_frac).round() as u32;
        let end = ((w * (1.0 - self.search_frac)).round() as u32).min(width - 1);
        let band = SearchBand { start, end };
        if band.is_empty() {
            return Err(SplitError::InvalidParameters(format!(
                "search band [{start}, {end}) is empty for width {width} with search_frac {}",
                self.search_frac
            )));
        }
        Ok(band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SplitParams::default().validate().unwrap();
    }

    #[test]
    fn half_width_margin_is_rejected() {
        let params = SplitParams {
            search_frac: 0.5,
            ..SplitParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn non_positive_thresholds_are_rejected() {
        for params in [
            SplitParams {
                diff_threshold: 0.0,
                ..SplitParams::default()
            },
            SplitParams {
                row_threshold: -1.0,
                ..SplitParams::default()
            },
            SplitParams {
                row_ratio_threshold: 0.0,
                ..SplitParams::default()
            },
            SplitParams {
                row_ratio_threshold: 1.5,
                ..SplitParams::default()
            },
        ] {
            assert!(params.validate().is_err(), "accepted {params:?}");
        }
    }

    #[test]
    fn band_is_rounded_and_clamped() {
        let params = SplitParams::default();
        let band = params.search_band(20, 10).unwrap();
        assert_eq!(band, SearchBand { start: 9, end: 11 });

        // Zero margin still keeps the x + 1 neighbor in bounds.
        let wide_open = SplitParams {
            search_frac: 0.0,
            ..SplitParams::default()
        };
        let band = wide_open.search_band(4, 1).unwrap();
        assert_eq!(band, SearchBand { start: 0, end: 3 });
    }

    #[test]
    fn degenerate_band_is_rejected() {
        let params = SplitParams {
            search_frac: 0.45,
            ..SplitParams::default()
        };
        assert!(params.search_band(2, 2).is_err());
        assert!(params.search_band(1, 10).is_err());
        assert!(params.search_band(10, 0).is_err());
    }
}
