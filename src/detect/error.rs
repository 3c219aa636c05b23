use thiserror::Error;

/// Detection failure.
///
/// Every precondition violation is reported before any scanning begins.
/// Pixel content never produces an error; corruption is a detection
/// outcome, not a failure.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
