//! Commercial detection port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::channel::StrategyName;
use crate::domain::cutlist::DetectionResult;

/// Detection errors
#[derive(Debug, Clone, Error)]
pub enum DetectionError {
    #[error("{tool} not found. Please install {tool} or set its path in the config")]
    ToolNotFound { tool: String },

    #[error("Failed to run {tool}: {message}")]
    ToolInvocation { tool: String, message: String },

    #[error("{tool} timed out after {secs}s")]
    TimedOut { tool: String, secs: u64 },

    #[error("Unusable {tool} output: {message}")]
    ToolOutput { tool: String, message: String },

    #[error("No usable audio stream: {0}")]
    NoAudioStream(String),

    #[error("Scratch directory error: {0}")]
    Scratch(String),
}

/// Port for commercial break detection
#[async_trait]
pub trait CommercialDetector: Send + Sync {
    /// Strategy this detector implements
    fn strategy(&self) -> StrategyName;

    /// Detect commercial breaks in a recording.
    ///
    /// # Arguments
    /// * `path` - Absolute path of the recording file
    ///
    /// # Returns
    /// The skip list and its break count, or an error
    async fn detect(&self, path: &Path) -> Result<DetectionResult, DetectionError>;
}
