use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::detect::{SplitDetector, SplitParams};

const DEFAULT_ANNOTATED_DIR: &str = "annotated_images";
const DEFAULT_PROFILE_DIR: &str = "profiles";

#[derive(Debug, Deserialize, Default)]
struct TearscanConfigFile {
    detector: Option<DetectorConfigFile>,
    output: Option<OutputConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct DetectorConfigFile {
    search_frac: Option<f64>,
    diff_threshold: Option<f64>,
    row_threshold: Option<f64>,
    row_ratio_threshold: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct OutputConfigFile {
    annotated_dir: Option<PathBuf>,
    profile_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct TearscanConfig {
    pub params: SplitParams,
    pub annotated_dir: PathBuf,
    pub profile_dir: PathBuf,
}

impl TearscanConfig {
    /// Load configuration: the JSON file named by `TEARSCAN_CONFIG` (if
    /// set), then `TEARSCAN_*` environment overrides, then validation.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("TEARSCAN_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: TearscanConfigFile) -> Self {
        let defaults = SplitParams::default();
        let detector = file.detector.unwrap_or_default();
        let params = SplitParams {
            search_frac: detector.search_frac.unwrap_or(defaults.search_frac),
            diff_threshold: detector.diff_threshold.unwrap_or(defaults.diff_threshold),
            row_threshold: detector.row_threshold.unwrap_or(defaults.row_threshold),
            row_ratio_threshold: detector
                .row_ratio_threshold
                .unwrap_or(defaults.row_ratio_threshold),
        };
        let output = file.output.unwrap_or_default();
        Self {
            params,
            annotated_dir: output
                .annotated_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ANNOTATED_DIR)),
            profile_dir: output
                .profile_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_DIR)),
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(value) = env_f64("TEARSCAN_SEARCH_FRAC")? {
            self.params.search_frac = value;
        }
        if let Some(value) = env_f64("TEARSCAN_DIFF_THRESHOLD")? {
            self.params.diff_threshold = value;
        }
        if let Some(value) = env_f64("TEARSCAN_ROW_THRESHOLD")? {
            self.params.row_threshold = value;
        }
        if let Some(value) = env_f64("TEARSCAN_ROW_RATIO_THRESHOLD")? {
            self.params.row_ratio_threshold = value;
        }
        if let Ok(dir) = std::env::var("TEARSCAN_ANNOTATED_DIR") {
            if !dir.trim().is_empty() {
                self.annotated_dir = PathBuf::from(dir);
            }
        }
        if let Ok(dir) = std::env::var("TEARSCAN_PROFILE_DIR") {
            if !dir.trim().is_empty() {
                self.profile_dir = PathBuf::from(dir);
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        SplitDetector::new(self.params)?;
        Ok(())
    }
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            let value: f64 = raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("{key} must be a number, got {raw:?}"))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

fn read_config_file(path: &Path) -> Result<TearscanConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
