//! Result writer - persists flagging outcomes
//!
//! Every write here is best effort: failures are logged and folded into the
//! returned state, never propagated.

use tracing::{error, info, warn};

use crate::domain::cutlist::DetectionResult;
use crate::domain::job::{breaks_found_comment, JobId, JobState, JobStatus, RecordingKey};

use super::ports::{RecorderDatabase, SkipListWriter};

/// What the detection stage produced
#[derive(Debug, Clone, Copy)]
pub enum FlagOutcome<'a> {
    /// Detection finished; the result is to be written
    Detected(&'a DetectionResult),
    /// A stage failed; the comment names it for the job queue
    Failed { comment: &'a str },
}

/// Persists skip lists, flag states, and job status
pub struct ResultWriter<'a, D: RecorderDatabase, W: SkipListWriter> {
    db: &'a D,
    skiplist: &'a W,
    job: Option<JobId>,
    key: RecordingKey,
}

impl<'a, D: RecorderDatabase, W: SkipListWriter> ResultWriter<'a, D, W> {
    pub fn new(db: &'a D, skiplist: &'a W, job: Option<JobId>, key: RecordingKey) -> Self {
        Self {
            db,
            skiplist,
            job,
            key,
        }
    }

    /// Update the job row, if this run has one
    pub async fn report_job(&self, status: JobStatus, comment: &str) {
        let Some(job) = self.job else {
            return;
        };
        if let Err(e) = self.db.update_job(job, status, comment).await {
            warn!(%job, %status, error = %e, "failed to update job status");
        }
    }

    /// Record the recording's flag state; false if the write failed
    pub async fn mark(&self, state: JobState) -> bool {
        match self.db.set_flag_state(&self.key, state).await {
            Ok(()) => true,
            Err(e) => {
                error!(key = %self.key, %state, error = %e, "failed to set flag state");
                false
            }
        }
    }

    /// Persist the outcome and return the state the recording ended in
    pub async fn persist(&self, outcome: FlagOutcome<'_>) -> JobState {
        match outcome {
            FlagOutcome::Detected(result) => self.persist_detection(result).await,
            FlagOutcome::Failed { comment } => {
                self.mark(JobState::Failed).await;
                self.report_job(JobStatus::Errored, comment).await;
                JobState::Failed
            }
        }
    }

    async fn persist_detection(&self, result: &DetectionResult) -> JobState {
        if let Err(e) = self.skiplist.write_skiplist(&self.key, &result.cutlist).await {
            // Job status is left as is; the queue shows the job still running.
            error!(key = %self.key, error = %e, "failed to write skip list");
            self.mark(JobState::Failed).await;
            return JobState::Failed;
        }

        if !self.mark(JobState::Flagged).await {
            return JobState::Failed;
        }

        let comment = breaks_found_comment(result.break_count);
        info!(key = %self.key, skiplist = %result.cutlist, "{}", comment);
        self.report_job(JobStatus::Finished, &comment).await;
        JobState::Flagged
    }
}
