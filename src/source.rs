//! Frame acquisition.
//!
//! Two ways to obtain frames:
//! - Decoded image files (PNG/JPEG) for batch runs.
//! - A deterministic synthetic source for tests and the demo binary.
//!
//! Sources hand over fully decoded rectangular RGB frames; partial or
//! failed decodes surface as errors here, never inside the detector.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::frame::{Frame, CHANNELS};

/// Decode one image file into an RGB frame.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let img = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    Frame::from_rgb(img.into_raw(), width, height)
        .with_context(|| format!("decoded image {} has an inconsistent buffer", path.display()))
}

/// Collect the PNG/JPEG files directly under `dir`, sorted by name.
pub fn collect_image_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        if matches!(ext.as_deref(), Some("png" | "jpg" | "jpeg")) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

// ----------------------------------------------------------------------------
// Synthetic source
// ----------------------------------------------------------------------------

/// Shape of a generated frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntheticScene {
    /// Uniform color, no discontinuity.
    Clean,
    /// Two solid halves; `last_left_column` is the final column of the
    /// left half.
    Torn { last_left_column: u32 },
}

/// Configuration for the synthetic source.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    pub width: u32,
    pub height: u32,
    /// Fill color for clean frames and the left half of torn frames.
    pub left: [u8; 3],
    /// Fill color for the right half of torn frames.
    pub right: [u8; 3],
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            left: [0, 0, 0],
            right: [255, 255, 255],
        }
    }
}

/// Deterministic frame generator.
pub struct SyntheticSource {
    config: SyntheticConfig,
    frames_generated: u64,
}

impl SyntheticSource {
    pub fn new(config: SyntheticConfig) -> Self {
        Self {
            config,
            frames_generated: 0,
        }
    }

    /// Generate one frame of the requested scene.
    pub fn next_frame(&mut self, scene: SyntheticScene) -> Result<Frame> {
        let frame = match scene {
            SyntheticScene::Clean => {
                Frame::solid(self.config.width, self.config.height, self.config.left)?
            }
            SyntheticScene::Torn { last_left_column } => self.torn_frame(last_left_column)?,
        };
        self.frames_generated += 1;
        Ok(frame)
    }

    pub fn frames_generated(&self) -> u64 {
        self.frames_generated
    }

    fn torn_frame(&self, last_left_column: u32) -> Result<Frame> {
        let width = self.config.width;
        let height = self.config.height;
        if width < 2 || last_left_column >= width - 1 {
            return Err(anyhow!(
                "tear column {last_left_column} is not interior to a frame {width} wide"
            ));
        }
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for _y in 0..height {
            for x in 0..width {
                let rgb = if x <= last_left_column {
                    self.config.left
                } else {
                    self.config.right
                };
                data.extend_from_slice(&rgb);
            }
        }
        Ok(Frame::from_rgb(data, width, height)?)
    }
}
