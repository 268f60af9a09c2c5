//! Silence gap coalescing

use crate::domain::cutlist::{FrameSegment, SilenceWindow};

/// Frame rate used to convert silence timestamps to frame numbers
pub const FRAMES_PER_SECOND: u32 = 25;

/// Default longest span, in seconds, treated as one commercial break
pub const DEFAULT_MAX_COMM_BREAK_SECS: f64 = 400.0;

/// Merges silence timestamps into commercial break segments.
///
/// Silences less than `max_break_secs` after the first silence of the
/// current window belong to the same break. A later silence closes the
/// window and opens a new one. The last window always runs to the end of
/// the recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceCoalescer {
    max_break_secs: f64,
    fps: u32,
}

impl SilenceCoalescer {
    /// Create a coalescer with the given break threshold at 25 fps
    pub fn new(max_break_secs: f64) -> Self {
        Self {
            max_break_secs,
            fps: FRAMES_PER_SECOND,
        }
    }

    /// Override the frame rate
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn max_break_secs(&self) -> f64 {
        self.max_break_secs
    }

    /// Group silence timestamps (seconds) into windows.
    /// Non-finite timestamps are ignored.
    pub fn windows(&self, events: &[f64]) -> Vec<SilenceWindow> {
        let mut events: Vec<f64> = events.iter().copied().filter(|t| t.is_finite()).collect();
        events.sort_by(f64::total_cmp);

        let mut events = events.into_iter();
        let Some(first) = events.next() else {
            return vec![SilenceWindow::at(0.0)];
        };

        let mut windows = Vec::new();
        let mut current = SilenceWindow::at(first);
        for t in events {
            if t - current.start < self.max_break_secs {
                current.finish = t;
            } else {
                windows.push(current);
                current = SilenceWindow::at(t);
            }
        }
        windows.push(current);
        windows
    }

    /// Coalesce silence timestamps into frame segments.
    ///
    /// Every window but the last becomes a closed segment; the last is
    /// open-ended. Zero events give the single segment `[1, sentinel)`.
    pub fn coalesce(&self, events: &[f64]) -> Vec<FrameSegment> {
        let mut windows = self.windows(events);
        let last = windows.pop().unwrap_or(SilenceWindow::at(0.0));

        let mut segments: Vec<FrameSegment> =
            windows.iter().map(|w| self.closed_segment(w)).collect();
        segments.push(FrameSegment::open(self.start_frame(last.start)));
        segments
    }

    /// One frame in from the window's first silence
    fn start_frame(&self, secs: f64) -> u64 {
        self.to_frames(secs) + 1
    }

    /// One second back from the window's last silence
    fn end_frame(&self, secs: f64) -> u64 {
        self.to_frames(secs - 1.0)
    }

    fn to_frames(&self, secs: f64) -> u64 {
        (secs.max(0.0) * f64::from(self.fps)).floor() as u64
    }

    fn closed_segment(&self, window: &SilenceWindow) -> FrameSegment {
        // A lone silence pads past itself and collapses to its start frame.
        FrameSegment::clamped(self.start_frame(window.start), self.end_frame(window.finish))
    }
}

impl Default for SilenceCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COMM_BREAK_SECS)
    }
}
