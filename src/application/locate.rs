//! Recording locator

use std::path::PathBuf;

use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::domain::job::{FlagTarget, LocatedRecording, RecordingKey};

use super::ports::{DatabaseError, RecorderDatabase};

/// Errors while resolving a recording to a file
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Recording lookup failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Recording file \"{basename}\" not found in storage group \"{group}\" (searched: {searched})")]
    FileNotFound {
        basename: String,
        group: String,
        searched: String,
    },
}

/// Resolves a flagging target to recording metadata and an absolute path
pub struct RecordingLocator<'a, D: RecorderDatabase> {
    db: &'a D,
}

impl<'a, D: RecorderDatabase> RecordingLocator<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    /// Look up the recording and find its file under the storage roots
    pub async fn locate(&self, target: FlagTarget) -> Result<LocatedRecording, LocateError> {
        let key = self.resolve_key(target).await?;
        let info = self.db.recording_info(&key).await?;
        let roots = self.db.storage_roots(&info.storage_group).await?;

        let path = Self::find_in_roots(&info.basename, &roots).await.ok_or_else(|| {
            LocateError::FileNotFound {
                basename: info.basename.clone(),
                group: info.storage_group.clone(),
                searched: roots
                    .iter()
                    .map(|r| r.to_string_lossy().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })?;

        Ok(LocatedRecording { info, path })
    }

    async fn resolve_key(&self, target: FlagTarget) -> Result<RecordingKey, DatabaseError> {
        match target {
            FlagTarget::Job(job) => self.db.job_recording(job).await,
            FlagTarget::Recording(key) => Ok(key),
        }
    }

    /// First root that holds the file, in configured order
    async fn find_in_roots(basename: &str, roots: &[PathBuf]) -> Option<PathBuf> {
        for root in roots {
            let candidate = root.join(basename);
            if fs::try_exists(&candidate).await.unwrap_or(false) {
                return Some(candidate);
            }
            debug!(path = %candidate.display(), "recording not in storage root");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MockDatabase;
    use crate::domain::job::JobId;

    #[tokio::test]
    async fn locates_file_in_second_root() {
        let empty = tempfile::tempdir().unwrap();
        let holder = tempfile::tempdir().unwrap();
        std::fs::write(holder.path().join("1001_20250101083714.ts"), b"ts").unwrap();

        let db = MockDatabase::new()
            .with_roots(vec![empty.path().to_path_buf(), holder.path().to_path_buf()]);
        let located = RecordingLocator::new(&db)
            .locate(FlagTarget::Job(JobId(7)))
            .await
            .unwrap();

        assert_eq!(located.path, holder.path().join("1001_20250101083714.ts"));
        assert_eq!(located.info.callsign, "Dave HD");
    }

    #[tokio::test]
    async fn missing_file_reports_searched_roots() {
        let empty = tempfile::tempdir().unwrap();
        let db = MockDatabase::new().with_roots(vec![empty.path().to_path_buf()]);

        let err = RecordingLocator::new(&db)
            .locate(FlagTarget::Job(JobId(7)))
            .await
            .unwrap_err();

        match err {
            LocateError::FileNotFound { basename, searched, .. } => {
                assert_eq!(basename, "1001_20250101083714.ts");
                assert!(searched.contains(&empty.path().to_string_lossy().to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unknown_job_is_a_database_error() {
        let db = MockDatabase::new().without_job();
        let err = RecordingLocator::new(&db)
            .locate(FlagTarget::Job(JobId(99)))
            .await
            .unwrap_err();
        assert!(matches!(err, LocateError::Database(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn direct_target_skips_job_lookup() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("1001_20250101083714.ts"), b"ts").unwrap();
        let db = MockDatabase::new()
            .without_job()
            .with_roots(vec![root.path().to_path_buf()]);

        let key = db.key();
        let located = RecordingLocator::new(&db)
            .locate(FlagTarget::Recording(key))
            .await
            .unwrap();
        assert_eq!(located.info.key, key);
    }
}
