//! Channel domain - callsign classification and detection settings

mod classifier;
mod comm_method;

pub use classifier::{normalize_callsign, ChannelClassifier, StrategyName};
pub use comm_method::{CommMethod, COMM_DETECT_COMMFREE, COMM_DETECT_OFF, COMM_DETECT_UNINIT};
