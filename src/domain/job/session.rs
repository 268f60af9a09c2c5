//! Flagging session state machine

use std::fmt;
use thiserror::Error;

/// Commercial flagging states of a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JobState {
    #[default]
    Pending,
    InProgress,
    Flagged,
    Failed,
}

impl JobState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Flagged => "flagged",
            Self::Failed => "failed",
        }
    }

    /// Legacy `recorded.commflagged` value.
    ///
    /// MythTV has no failure code, so a failed run reads as "not flagged"
    /// and the recording can be queued again.
    pub const fn commflagged(&self) -> i32 {
        match self {
            Self::Pending | Self::Failed => 0,
            Self::Flagged => 1,
            Self::InProgress => 2,
        }
    }

    /// Whether the state ends the session
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Flagged | Self::Failed)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: JobState,
    pub action: String,
}

/// Flagging session entity.
/// Manages state transitions for one flagging run.
///
/// State machine:
///   PENDING -> IN_PROGRESS (start)
///   IN_PROGRESS -> FLAGGED (complete)
///   IN_PROGRESS -> FAILED (fail)
#[derive(Debug, Default)]
pub struct FlagSession {
    state: JobState,
}

impl FlagSession {
    /// Create a new session in pending state
    pub fn new() -> Self {
        Self {
            state: JobState::Pending,
        }
    }

    /// Get the current state
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Transition from PENDING to IN_PROGRESS
    pub fn start(&mut self) -> Result<JobState, InvalidStateTransition> {
        self.transition(JobState::Pending, JobState::InProgress, "start flagging")
    }

    /// Transition from IN_PROGRESS to FLAGGED
    pub fn complete(&mut self) -> Result<JobState, InvalidStateTransition> {
        self.transition(JobState::InProgress, JobState::Flagged, "complete flagging")
    }

    /// Transition from IN_PROGRESS to FAILED
    pub fn fail(&mut self) -> Result<JobState, InvalidStateTransition> {
        self.transition(JobState::InProgress, JobState::Failed, "fail flagging")
    }

    fn transition(
        &mut self,
        from: JobState,
        to: JobState,
        action: &str,
    ) -> Result<JobState, InvalidStateTransition> {
        if self.state != from {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = to;
        Ok(to)
    }
}
