//! Diagnostics consumers.
//!
//! The detector never renders or persists anything. A `ProfileSink`
//! receives the winning column's per-row profile alongside the report and
//! does what it wants with it; the hand-off is one-way and best-effort, so
//! callers log sink failures and keep scanning.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::detect::SplitReport;

/// Receives the winning column's per-row profile alongside the report.
pub trait ProfileSink {
    fn record(&mut self, report: &SplitReport, profile: &[f64]) -> Result<()>;
}

/// Writes one CSV per frame: a header plus one `row,diff` line per image
/// row. The target directory is created on demand.
pub struct CsvProfileWriter {
    dir: PathBuf,
    label: Option<String>,
}

impl CsvProfileWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            label: None,
        }
    }

    /// Prefix the next file names with `label`, keeping output from
    /// different frames apart.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    fn file_name(&self, report: &SplitReport) -> String {
        let core = format!(
            "column_diff_{}_RR_{:.3}_{}.csv",
            report.split_column,
            report.row_ratio,
            report.status()
        );
        match &self.label {
            Some(label) => format!("{label}_{core}"),
            None => core,
        }
    }
}

impl ProfileSink for CsvProfileWriter {
    fn record(&mut self, report: &SplitReport, profile: &[f64]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating profile directory {}", self.dir.display()))?;
        let path = self.dir.join(self.file_name(report));

        let mut out = String::with_capacity(16 + profile.len() * 12);
        out.push_str("row,diff\n");
        for (row, diff) in profile.iter().enumerate() {
            out.push_str(&format!("{row},{diff:.4}\n"));
        }
        fs::write(&path, out).with_context(|| format!("writing profile {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn report() -> SplitReport {
        SplitReport {
            is_corrupt: true,
            split_column: 9,
            max_mean_diff: 441.7,
            row_ratio: 1.0,
            elapsed: Duration::from_millis(1),
        }
    }

    #[test]
    fn csv_writer_emits_one_line_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvProfileWriter::new(dir.path());
        sink.set_label("sample");
        sink.record(&report(), &[441.67, 441.67, 0.0]).unwrap();

        let path = dir.path().join("sample_column_diff_9_RR_1.000_corrupt.csv");
        let contents = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "row,diff");
        assert_eq!(lines[1], "0,441.6700");
        assert_eq!(lines[3], "2,0.0000");
    }
}
