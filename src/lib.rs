//! tearscan
//!
//! Single-frame corruption detector for video and still frames that
//! exhibit a sharp vertical discontinuity (a "tear") in the image
//! interior. Given one decoded RGB frame, the detector decides whether the
//! frame is corrupted, locates the column at which the tear occurs, and
//! reports the confidence signals behind the decision.
//!
//! # Module Structure
//!
//! - `frame`: decoded RGB frame model (validated construction, read-only)
//! - `detect`: the split detector - interior-band scan, magnitude and
//!   extent thresholds, deterministic tie-break
//! - `diagnostics`: profile sink consumers (CSV export of the winning
//!   column's per-row profile)
//! - `annotate`: marker overlay on a copy of the frame
//! - `source`: image-file loading and a synthetic generator
//! - `config`: JSON file + environment configuration
//! - `ui`: batch progress reporting
//!
//! Detection is a pure function of one frame and the tunable parameters.
//! Rendering, persistence, and progress reporting are consumers of the
//! result, never part of the detection path.

pub mod annotate;
pub mod config;
pub mod detect;
pub mod diagnostics;
pub mod frame;
pub mod source;
pub mod ui;

pub use annotate::{annotate, to_image};
pub use config::TearscanConfig;
pub use detect::{column_profile, SearchBand, SplitDetector, SplitError, SplitParams, SplitReport};
pub use diagnostics::{CsvProfileWriter, ProfileSink};
pub use frame::{Frame, FrameError};
pub use source::{
    collect_image_paths, load_frame, SyntheticConfig, SyntheticScene, SyntheticSource,
};
pub use ui::{Ui, UiMode};
