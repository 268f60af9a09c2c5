//! Skip list persistence port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::cutlist::Cutlist;
use crate::domain::job::RecordingKey;

/// Skip list write errors
#[derive(Debug, Clone, Error)]
pub enum SkipListError {
    #[error("{0} not found. Please install MythTV's mythutil or set its path in the config")]
    ToolNotFound(String),

    #[error("Failed to run skip list writer: {0}")]
    StartFailed(String),

    #[error("Skip list writer exited with code {code:?}: {message}")]
    Rejected { code: Option<i32>, message: String },
}

/// Port for writing a recording's skip list
#[async_trait]
pub trait SkipListWriter: Send + Sync {
    /// Replace the recording's skip list; an empty cutlist clears it.
    async fn write_skiplist(&self, key: &RecordingKey, cutlist: &Cutlist)
        -> Result<(), SkipListError>;
}
