//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod channel;
pub mod config;
pub mod cutlist;
pub mod error;
pub mod job;
pub mod silence;

// Re-export common types
pub use channel::{ChannelClassifier, CommMethod, StrategyName};
pub use config::{AppConfig, DatabaseConfig};
pub use cutlist::{Cutlist, DetectionResult, FrameSegment};
pub use error::*;
pub use job::{FlagTarget, JobId, JobState, JobStatus, RecordingInfo, RecordingKey, StartTime};
pub use silence::SilenceCoalescer;
