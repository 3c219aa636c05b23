use std::time::Duration;

/// Outcome of scanning one frame.
///
/// All signals refer to the winning column of the interior band.
#[derive(Clone, Debug)]
pub struct SplitReport {
    /// Both the magnitude and the extent thresholds were met.
    pub is_corrupt: bool,
    /// Interior column judged most likely to border a tear.
    pub split_column: u32,
    /// Mean per-row color distance at the winning column.
    pub max_mean_diff: f64,
    /// Fraction of rows at the winning column at or above the row
    /// threshold.
    pub row_ratio: f64,
    /// Wall-clock cost of the scan. Diagnostic only; never feeds the
    /// decision.
    pub elapsed: Duration,
}

impl SplitReport {
    /// Short status for filenames and log lines.
    pub fn status(&self) -> &'static str {
        if self.is_corrupt {
            "corrupt"
        } else {
            "clean"
        }
    }
}
