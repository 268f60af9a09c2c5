//! Commercial detector adapters

pub mod comskip;
pub mod scratch;
pub mod silence;

pub use comskip::ComskipDetector;
pub use scratch::ScratchDir;
pub use silence::{SilenceAnalyzer, SilenceSettings};
