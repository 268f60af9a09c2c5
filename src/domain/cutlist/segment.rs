//! Frame segment value objects

use std::fmt;

use crate::domain::error::InvalidSegmentError;

/// Placeholder end frame meaning "to the end of the recording"
pub const SENTINEL_FRAME: u64 = 9_999_999;

/// End bound of a frame segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEnd {
    /// Ends at a known frame
    At(u64),
    /// Runs to the end of the recording
    Open,
}

/// Half-open frame interval `[start, end)`.
/// Invariant: `start <= end` for closed segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSegment {
    start: u64,
    end: FrameEnd,
}

impl FrameSegment {
    /// Create a segment with a known end frame
    pub fn closed(start: u64, end: u64) -> Result<Self, InvalidSegmentError> {
        if end < start {
            return Err(InvalidSegmentError { start, end });
        }
        Ok(Self {
            start,
            end: FrameEnd::At(end),
        })
    }

    /// Create a closed segment, raising `end` to `start` when it falls short
    pub fn clamped(start: u64, end: u64) -> Self {
        Self {
            start,
            end: FrameEnd::At(end.max(start)),
        }
    }

    /// Create a segment that runs to the end of the recording
    pub const fn open(start: u64) -> Self {
        Self {
            start,
            end: FrameEnd::Open,
        }
    }

    pub const fn start(&self) -> u64 {
        self.start
    }

    pub const fn end(&self) -> FrameEnd {
        self.end
    }

    /// End frame as written to the skip list
    pub const fn end_frame(&self) -> u64 {
        match self.end {
            FrameEnd::At(frame) => frame,
            FrameEnd::Open => SENTINEL_FRAME,
        }
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.end, FrameEnd::Open)
    }
}

impl fmt::Display for FrameSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end_frame())
    }
}

/// Silence window in seconds, before frame conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceWindow {
    pub start: f64,
    pub finish: f64,
}

impl SilenceWindow {
    /// Window opened by a single silence event
    pub const fn at(secs: f64) -> Self {
        Self {
            start: secs,
            finish: secs,
        }
    }
}
