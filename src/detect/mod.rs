mod error;
mod params;
mod result;
mod splitter;

pub use error::SplitError;
pub use params::{SearchBand, SplitParams};
pub use result::SplitReport;
pub use splitter::{column_profile, SplitDetector};
