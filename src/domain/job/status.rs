//! Job queue status codes

use std::fmt;

/// Status values the wrapper writes to `jobqueue.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Starting,
    Running,
    Finished,
    Errored,
}

impl JobStatus {
    /// MythTV's numeric job status code
    pub const fn code(&self) -> i32 {
        match self {
            Self::Starting => 0x0003,
            Self::Running => 0x0004,
            Self::Finished => 0x0110,
            Self::Errored => 0x0130,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Errored => "errored",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Job comment reporting a successful run
pub fn breaks_found_comment(break_count: usize) -> String {
    format!("{} break(s) found.", break_count)
}
