//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod database;
pub mod detector;
pub mod skiplist;

// Re-export common types
pub use config::ConfigStore;
pub use database::{DatabaseError, RecorderDatabase};
pub use detector::{CommercialDetector, DetectionError};
pub use skiplist::{SkipListError, SkipListWriter};
