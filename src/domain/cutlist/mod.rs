//! Cutlist domain - frame segments and the recorder's skip list format

#[allow(clippy::module_inception)]
mod cutlist;
mod segment;

pub use cutlist::{Cutlist, DetectionResult};
pub use segment::{FrameEnd, FrameSegment, SilenceWindow, SENTINEL_FRAME};
