//! Channel commercial detection method

/// MythTV `channel.commmethod` value for commercial-free channels
pub const COMM_DETECT_COMMFREE: i32 = -2;
/// MythTV `channel.commmethod` value when detection was never configured
pub const COMM_DETECT_UNINIT: i32 = -1;
/// MythTV `channel.commmethod` value for detection switched off
pub const COMM_DETECT_OFF: i32 = 0;

/// Commercial detection setting of the recording's channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommMethod {
    /// Channel broadcasts no commercials
    CommFree,
    /// Unknown, e.g. the channel was deleted after recording
    #[default]
    Uninit,
    /// Detection disabled for this channel
    Off,
    /// Any enabled detection method bitmask
    Enabled(i32),
}

impl CommMethod {
    /// Map the raw column value; a missing channel row is `Uninit`
    pub fn from_raw(raw: Option<i32>) -> Self {
        match raw {
            None | Some(COMM_DETECT_UNINIT) => Self::Uninit,
            Some(COMM_DETECT_COMMFREE) => Self::CommFree,
            Some(COMM_DETECT_OFF) => Self::Off,
            Some(mask) => Self::Enabled(mask),
        }
    }

    /// Whether detection must be skipped and the skip list cleared
    pub const fn skips_detection(&self) -> bool {
        matches!(self, Self::CommFree | Self::Off)
    }
}
