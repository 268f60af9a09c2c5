//! Recorder database port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::job::{JobId, JobState, JobStatus, RecordingInfo, RecordingKey};

/// Database errors
#[derive(Debug, Clone, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    Connection(String),

    #[error("Database query failed: {0}")]
    Query(String),

    #[error("{0} not found")]
    NotFound(String),
}

/// Port for the recorder's metadata and status tables
#[async_trait]
pub trait RecorderDatabase: Send + Sync {
    /// Channel id and start time of the recording a job refers to
    async fn job_recording(&self, job: JobId) -> Result<RecordingKey, DatabaseError>;

    /// Recording details: base filename, storage group, titles, channel
    async fn recording_info(&self, key: &RecordingKey) -> Result<RecordingInfo, DatabaseError>;

    /// Directories configured for a storage group
    async fn storage_roots(&self, group: &str) -> Result<Vec<PathBuf>, DatabaseError>;

    /// Write the recording's commercial flagging state
    async fn set_flag_state(&self, key: &RecordingKey, state: JobState)
        -> Result<(), DatabaseError>;

    /// Update a job's queue status and comment
    async fn update_job(
        &self,
        job: JobId,
        status: JobStatus,
        comment: &str,
    ) -> Result<(), DatabaseError>;
}
