//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like comskip, FFmpeg, mythutil, and
//! the MythTV database.

pub mod config;
pub mod database;
pub mod detection;
pub mod process;
pub mod skiplist;

// Re-export adapters
pub use config::{MythConfigResolver, XdgConfigStore};
pub use database::MythDatabase;
pub use detection::{ComskipDetector, SilenceAnalyzer, SilenceSettings};
pub use process::{ToolError, ToolOutput, ToolRunner};
pub use skiplist::MythutilSkipList;
