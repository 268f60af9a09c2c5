//! Job domain - recording identity, queue status, and flagging state

mod recording;
mod session;
mod status;

pub use recording::{
    FlagTarget, JobId, LocatedRecording, RecordingInfo, RecordingKey, StartTime,
};
pub use session::{FlagSession, InvalidStateTransition, JobState};
pub use status::{breaks_found_comment, JobStatus};
