//! Port mocks shared by the application tests

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::channel::{CommMethod, StrategyName};
use crate::domain::cutlist::{Cutlist, DetectionResult};
use crate::domain::job::{JobId, JobState, JobStatus, RecordingInfo, RecordingKey};

use super::ports::{
    CommercialDetector, DatabaseError, DetectionError, RecorderDatabase, SkipListError,
    SkipListWriter,
};

/// A write the mock database received
#[derive(Debug, Clone, PartialEq)]
pub enum DbWrite {
    FlagState(JobState),
    Job(JobStatus, String),
}

pub struct MockDatabase {
    info: RecordingInfo,
    has_job: bool,
    roots: Vec<PathBuf>,
    fail_writes: bool,
    writes: Mutex<Vec<DbWrite>>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self {
            info: RecordingInfo {
                key: RecordingKey {
                    chanid: 1001,
                    starttime: "20250101083714".parse().unwrap(),
                },
                basename: "1001_20250101083714.ts".to_string(),
                storage_group: "Default".to_string(),
                title: "Test Show".to_string(),
                subtitle: "Test Episode".to_string(),
                callsign: "Dave HD".to_string(),
                comm_method: CommMethod::Enabled(1),
            },
            has_job: true,
            roots: Vec::new(),
            fail_writes: false,
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.roots = roots;
        self
    }

    /// Put the recording file into a fresh root
    pub fn with_recording_in(self, root: &Path) -> Self {
        std::fs::write(root.join(&self.info.basename), b"ts").unwrap();
        self.with_roots(vec![root.to_path_buf()])
    }

    pub fn with_callsign(mut self, callsign: &str) -> Self {
        self.info.callsign = callsign.to_string();
        self
    }

    pub fn with_comm_method(mut self, comm_method: CommMethod) -> Self {
        self.info.comm_method = comm_method;
        self
    }

    pub fn without_job(mut self) -> Self {
        self.has_job = false;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn key(&self) -> RecordingKey {
        self.info.key
    }

    pub fn writes(&self) -> Vec<DbWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn job_updates(&self) -> Vec<(JobStatus, String)> {
        self.writes()
            .into_iter()
            .filter_map(|w| match w {
                DbWrite::Job(status, comment) => Some((status, comment)),
                DbWrite::FlagState(_) => None,
            })
            .collect()
    }

    pub fn flag_states(&self) -> Vec<JobState> {
        self.writes()
            .into_iter()
            .filter_map(|w| match w {
                DbWrite::FlagState(state) => Some(state),
                DbWrite::Job(..) => None,
            })
            .collect()
    }

    fn record(&self, write: DbWrite) -> Result<(), DatabaseError> {
        if self.fail_writes {
            return Err(DatabaseError::Query("connection lost".to_string()));
        }
        self.writes.lock().unwrap().push(write);
        Ok(())
    }
}

#[async_trait]
impl RecorderDatabase for MockDatabase {
    async fn job_recording(&self, job: JobId) -> Result<RecordingKey, DatabaseError> {
        if self.has_job {
            Ok(self.info.key)
        } else {
            Err(DatabaseError::NotFound(format!("job {}", job)))
        }
    }

    async fn recording_info(&self, _key: &RecordingKey) -> Result<RecordingInfo, DatabaseError> {
        Ok(self.info.clone())
    }

    async fn storage_roots(&self, _group: &str) -> Result<Vec<PathBuf>, DatabaseError> {
        Ok(self.roots.clone())
    }

    async fn set_flag_state(
        &self,
        _key: &RecordingKey,
        state: JobState,
    ) -> Result<(), DatabaseError> {
        self.record(DbWrite::FlagState(state))
    }

    async fn update_job(
        &self,
        _job: JobId,
        status: JobStatus,
        comment: &str,
    ) -> Result<(), DatabaseError> {
        self.record(DbWrite::Job(status, comment.to_string()))
    }
}

pub struct MockSkipList {
    fail: bool,
    written: Mutex<Vec<String>>,
}

impl MockSkipList {
    pub fn new() -> Self {
        Self {
            fail: false,
            written: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            written: Mutex::new(Vec::new()),
        }
    }

    pub fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl SkipListWriter for MockSkipList {
    async fn write_skiplist(
        &self,
        _key: &RecordingKey,
        cutlist: &Cutlist,
    ) -> Result<(), SkipListError> {
        if self.fail {
            return Err(SkipListError::Rejected {
                code: Some(1),
                message: "recording not found".to_string(),
            });
        }
        self.written.lock().unwrap().push(cutlist.as_str().to_string());
        Ok(())
    }
}

pub struct MockDetector {
    strategy: StrategyName,
    result: Result<DetectionResult, DetectionError>,
    calls: AtomicUsize,
}

impl MockDetector {
    pub fn returning(strategy: StrategyName, result: DetectionResult) -> Self {
        Self {
            strategy,
            result: Ok(result),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(strategy: StrategyName, error: DetectionError) -> Self {
        Self {
            strategy,
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommercialDetector for MockDetector {
    fn strategy(&self) -> StrategyName {
        self.strategy
    }

    async fn detect(&self, _path: &Path) -> Result<DetectionResult, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
