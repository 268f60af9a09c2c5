//! Flag recording use case

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::channel::{ChannelClassifier, StrategyName};
use crate::domain::cutlist::DetectionResult;
use crate::domain::job::{
    FlagSession, FlagTarget, InvalidStateTransition, JobId, JobState, JobStatus,
    LocatedRecording, RecordingKey,
};

use super::locate::{LocateError, RecordingLocator};
use super::ports::{CommercialDetector, DetectionError, RecorderDatabase, SkipListWriter};
use super::result_writer::{FlagOutcome, ResultWriter};

/// Errors from the flag use case
#[derive(Debug, Error)]
pub enum FlagError {
    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error("{strategy} failed: {source}")]
    Detection {
        strategy: StrategyName,
        #[source]
        source: DetectionError,
    },

    #[error("Failed to persist flagging result for recording {0}")]
    Persistence(RecordingKey),

    #[error(transparent)]
    State(#[from] InvalidStateTransition),
}

/// Output from the flag use case
#[derive(Debug, Clone)]
pub struct FlagOutput {
    pub recording: LocatedRecording,
    /// Strategy that ran; None when the channel has detection switched off
    pub strategy: Option<StrategyName>,
    pub result: DetectionResult,
    pub state: JobState,
}

/// Commercial flagging use case: locate, classify, detect, persist
pub struct FlagRecordingUseCase<D, W, E, S>
where
    D: RecorderDatabase,
    W: SkipListWriter,
    E: CommercialDetector,
    S: CommercialDetector,
{
    db: D,
    skiplist: W,
    external: E,
    silence: S,
    classifier: ChannelClassifier,
}

impl<D, W, E, S> FlagRecordingUseCase<D, W, E, S>
where
    D: RecorderDatabase,
    W: SkipListWriter,
    E: CommercialDetector,
    S: CommercialDetector,
{
    /// Create a new use case instance
    pub fn new(db: D, skiplist: W, external: E, silence: S, classifier: ChannelClassifier) -> Self {
        Self {
            db,
            skiplist,
            external,
            silence,
            classifier,
        }
    }

    /// Execute the flagging workflow
    pub async fn execute(&self, target: FlagTarget) -> Result<FlagOutput, FlagError> {
        let job = match target {
            FlagTarget::Job(job) => Some(job),
            FlagTarget::Recording(_) => None,
        };
        self.report_early(job, JobStatus::Starting, "").await;

        let recording = match RecordingLocator::new(&self.db).locate(target).await {
            Ok(recording) => recording,
            Err(e) => {
                error!(error = %e, "could not locate recording");
                self.report_early(job, JobStatus::Errored, "Recording not found")
                    .await;
                return Err(e.into());
            }
        };

        let info = &recording.info;
        info!("filename:  {}", recording.path.display());
        info!("starttime: {}", info.key.starttime);
        info!("chanid:    {}", info.key.chanid);
        info!("title:     {}", info.title);
        info!("subtitle:  {}", info.subtitle);
        info!("callsign:  {}", info.callsign);

        let writer = ResultWriter::new(&self.db, &self.skiplist, job, info.key);
        let mut session = FlagSession::new();
        writer.mark(session.start()?).await;
        writer.report_job(JobStatus::Running, "Scanning").await;

        let (strategy, detection) = if info.comm_method.skips_detection() {
            info!(comm_method = ?info.comm_method, "commercial detection off for channel");
            (None, Ok(DetectionResult::empty()))
        } else {
            let detector = self.detector(self.classifier.classify(&info.callsign));
            let strategy = detector.strategy();
            info!(%strategy, "running commercial detection");
            (Some(strategy), detector.detect(&recording.path).await)
        };

        let result = match detection {
            Ok(result) => result,
            Err(source) => {
                // Only reachable when a detector actually ran.
                let strategy = strategy.unwrap_or(StrategyName::ExternalDetector);
                error!(%strategy, error = %source, "detection failed");
                let comment = format!("{} failed", strategy.label());
                writer.persist(FlagOutcome::Failed { comment: &comment }).await;
                session.fail()?;
                return Err(FlagError::Detection { strategy, source });
            }
        };

        match writer.persist(FlagOutcome::Detected(&result)).await {
            JobState::Flagged => session.complete()?,
            _ => {
                session.fail()?;
                return Err(FlagError::Persistence(info.key));
            }
        };

        Ok(FlagOutput {
            strategy,
            result,
            state: session.state(),
            recording,
        })
    }

    fn detector(&self, strategy: StrategyName) -> &dyn CommercialDetector {
        match strategy {
            StrategyName::ExternalDetector => &self.external,
            StrategyName::SilenceAnalyzer => &self.silence,
        }
    }

    /// Job update before the recording key is known
    async fn report_early(&self, job: Option<JobId>, status: JobStatus, comment: &str) {
        if let Some(job) = job {
            if let Err(e) = self.db.update_job(job, status, comment).await {
                warn!(%job, %status, error = %e, "failed to update job status");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{DbWrite, MockDatabase, MockDetector, MockSkipList};
    use crate::domain::channel::CommMethod;
    use crate::domain::cutlist::FrameSegment;

    fn silence_result() -> DetectionResult {
        DetectionResult::from(vec![
            FrameSegment::closed(2501, 2600).unwrap(),
            FrameSegment::open(15001),
        ])
    }

    fn comskip_result() -> DetectionResult {
        DetectionResult::from(vec![
            FrameSegment::closed(0, 1370).unwrap(),
            FrameSegment::closed(17950, 24245).unwrap(),
        ])
    }

    fn use_case(
        db: MockDatabase,
        skiplist: MockSkipList,
        external: MockDetector,
    ) -> FlagRecordingUseCase<MockDatabase, MockSkipList, MockDetector, MockDetector> {
        FlagRecordingUseCase::new(
            db,
            skiplist,
            external,
            MockDetector::returning(StrategyName::SilenceAnalyzer, silence_result()),
            ChannelClassifier::new(["dave"]),
        )
    }

    #[tokio::test]
    async fn denylisted_channel_uses_silence_analysis() {
        let root = tempfile::tempdir().unwrap();
        let db = MockDatabase::new().with_recording_in(root.path());
        let external = MockDetector::returning(StrategyName::ExternalDetector, comskip_result());
        let use_case = use_case(db, MockSkipList::new(), external);

        let output = use_case.execute(FlagTarget::Job(JobId(3))).await.unwrap();

        assert_eq!(output.strategy, Some(StrategyName::SilenceAnalyzer));
        assert_eq!(output.state, JobState::Flagged);
        assert_eq!(output.result.break_count, 1);
        assert_eq!(use_case.external.calls(), 0);
        assert_eq!(use_case.silence.calls(), 1);
        assert_eq!(
            use_case.skiplist.written(),
            vec!["2501-2600,15001-9999999,".to_string()]
        );
    }

    #[tokio::test]
    async fn job_status_follows_lifecycle() {
        let root = tempfile::tempdir().unwrap();
        let db = MockDatabase::new()
            .with_recording_in(root.path())
            .with_callsign("ITV1+1");
        let external = MockDetector::returning(StrategyName::ExternalDetector, comskip_result());
        let use_case = use_case(db, MockSkipList::new(), external);

        let output = use_case.execute(FlagTarget::Job(JobId(3))).await.unwrap();

        assert_eq!(output.strategy, Some(StrategyName::ExternalDetector));
        assert_eq!(
            use_case.db.writes(),
            vec![
                DbWrite::Job(JobStatus::Starting, String::new()),
                DbWrite::FlagState(JobState::InProgress),
                DbWrite::Job(JobStatus::Running, "Scanning".to_string()),
                DbWrite::FlagState(JobState::Flagged),
                DbWrite::Job(JobStatus::Finished, "1 break(s) found.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn detection_failure_marks_job_errored() {
        let root = tempfile::tempdir().unwrap();
        let db = MockDatabase::new()
            .with_recording_in(root.path())
            .with_callsign("Channel 4");
        let external = MockDetector::failing(
            StrategyName::ExternalDetector,
            DetectionError::ToolInvocation {
                tool: "comskip".to_string(),
                message: "exited with code 2".to_string(),
            },
        );
        let use_case = use_case(db, MockSkipList::new(), external);

        let err = use_case.execute(FlagTarget::Job(JobId(3))).await.unwrap_err();

        assert!(matches!(
            err,
            FlagError::Detection {
                strategy: StrategyName::ExternalDetector,
                ..
            }
        ));
        assert!(use_case.skiplist.written().is_empty());
        assert_eq!(
            use_case.db.job_updates().last(),
            Some(&(JobStatus::Errored, "Comskip failed".to_string()))
        );
        assert_eq!(use_case.db.flag_states().last(), Some(&JobState::Failed));
    }

    #[tokio::test]
    async fn skiplist_failure_is_a_persistence_error() {
        let root = tempfile::tempdir().unwrap();
        let db = MockDatabase::new().with_recording_in(root.path());
        let external = MockDetector::returning(StrategyName::ExternalDetector, comskip_result());
        let use_case = use_case(db, MockSkipList::failing(), external);

        let err = use_case.execute(FlagTarget::Job(JobId(3))).await.unwrap_err();

        assert!(matches!(err, FlagError::Persistence(_)));
        let updates = use_case.db.job_updates();
        assert_eq!(updates.last().map(|u| u.0), Some(JobStatus::Running));
    }

    #[tokio::test]
    async fn commercial_free_channel_clears_skiplist() {
        let root = tempfile::tempdir().unwrap();
        let db = MockDatabase::new()
            .with_recording_in(root.path())
            .with_comm_method(CommMethod::CommFree);
        let external = MockDetector::returning(StrategyName::ExternalDetector, comskip_result());
        let use_case = use_case(db, MockSkipList::new(), external);

        let output = use_case.execute(FlagTarget::Job(JobId(3))).await.unwrap();

        assert_eq!(output.strategy, None);
        assert_eq!(output.result.break_count, 0);
        assert_eq!(use_case.external.calls(), 0);
        assert_eq!(use_case.silence.calls(), 0);
        assert_eq!(use_case.skiplist.written(), vec![String::new()]);
        assert_eq!(
            use_case.db.job_updates().last(),
            Some(&(JobStatus::Finished, "0 break(s) found.".to_string()))
        );
    }

    #[tokio::test]
    async fn missing_recording_marks_job_errored() {
        let root = tempfile::tempdir().unwrap();
        let db = MockDatabase::new().with_roots(vec![root.path().to_path_buf()]);
        let external = MockDetector::returning(StrategyName::ExternalDetector, comskip_result());
        let use_case = use_case(db, MockSkipList::new(), external);

        let err = use_case.execute(FlagTarget::Job(JobId(3))).await.unwrap_err();

        assert!(matches!(err, FlagError::Locate(LocateError::FileNotFound { .. })));
        assert_eq!(
            use_case.db.writes(),
            vec![
                DbWrite::Job(JobStatus::Starting, String::new()),
                DbWrite::Job(JobStatus::Errored, "Recording not found".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn direct_recording_target_writes_no_job_status() {
        let root = tempfile::tempdir().unwrap();
        let db = MockDatabase::new()
            .with_recording_in(root.path())
            .without_job();
        let key = db.key();
        let external = MockDetector::returning(StrategyName::ExternalDetector, comskip_result());
        let use_case = use_case(db, MockSkipList::new(), external);

        let output = use_case.execute(FlagTarget::Recording(key)).await.unwrap();

        assert_eq!(output.state, JobState::Flagged);
        assert!(use_case.db.job_updates().is_empty());
        assert_eq!(
            use_case.db.flag_states(),
            vec![JobState::InProgress, JobState::Flagged]
        );
    }
}
