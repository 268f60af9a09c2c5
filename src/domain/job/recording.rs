//! Recording identity value objects

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::channel::CommMethod;
use crate::domain::error::StartTimeParseError;

/// Timestamp format used by mythutil and the `--starttime` flag
const START_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Job queue identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recording start time, always UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StartTime(DateTime<Utc>);

impl StartTime {
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self(time)
    }

    /// MythTV stores start times as naive UTC datetimes
    pub fn from_naive_utc(time: NaiveDateTime) -> Self {
        Self(time.and_utc())
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn as_naive_utc(&self) -> NaiveDateTime {
        self.0.naive_utc()
    }
}

impl FromStr for StartTime {
    type Err = StartTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), START_TIME_FORMAT)
            .map(Self::from_naive_utc)
            .map_err(|_| StartTimeParseError {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(START_TIME_FORMAT))
    }
}

/// Key of a recording: channel id plus start time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordingKey {
    pub chanid: u32,
    pub starttime: StartTime,
}

impl fmt::Display for RecordingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.chanid, self.starttime)
    }
}

/// Where the flagging request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagTarget {
    /// Queued job; status is reported back to the job row
    Job(JobId),
    /// Direct request by channel and start time
    Recording(RecordingKey),
}

/// Recording metadata gathered before detection
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingInfo {
    pub key: RecordingKey,
    pub basename: String,
    pub storage_group: String,
    pub title: String,
    pub subtitle: String,
    pub callsign: String,
    pub comm_method: CommMethod,
}

/// Recording resolved to a file on disk
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedRecording {
    pub info: RecordingInfo,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_start_time() {
        let start: StartTime = "20250101083714".parse().unwrap();
        assert_eq!(
            start.as_datetime(),
            Utc.with_ymd_and_hms(2025, 1, 1, 8, 37, 14).unwrap()
        );
    }

    #[test]
    fn parse_start_time_rejects_other_formats() {
        assert!("2025-01-01 08:37:14".parse::<StartTime>().is_err());
        assert!("250101083714".parse::<StartTime>().is_err());
        assert!("".parse::<StartTime>().is_err());
    }

    #[test]
    fn display_round_trips_mythutil_format() {
        let start = StartTime::new(Utc.with_ymd_and_hms(2024, 12, 31, 23, 5, 0).unwrap());
        assert_eq!(start.to_string(), "20241231230500");
    }

    #[test]
    fn recording_key_display() {
        let key = RecordingKey {
            chanid: 1001,
            starttime: "20250101083714".parse().unwrap(),
        };
        assert_eq!(key.to_string(), "1001_20250101083714");
    }
}
