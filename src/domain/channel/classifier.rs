//! Channel classification for detection strategy selection

use std::collections::HashSet;
use std::fmt;

/// Markers removed from a lower-cased callsign, applied in this order.
///
/// Removal is plain substring removal, so "hd" is also stripped from the
/// middle of a callsign. Denylist entries are normalized the same way.
const STRIPPED_MARKERS: &[&str] = &["+1", "+24", "hd"];

/// Detection strategy selected for a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyName {
    /// Black-box detector run as a subprocess (comskip)
    ExternalDetector,
    /// Silence interval analysis of the audio track
    SilenceAnalyzer,
}

impl StrategyName {
    /// Get the string identifier for this strategy
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExternalDetector => "external-detector",
            Self::SilenceAnalyzer => "silence-analyzer",
        }
    }

    /// Human-readable name for job comments
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ExternalDetector => "Comskip",
            Self::SilenceAnalyzer => "Silence detection",
        }
    }
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize a broadcast callsign into a classification key.
///
/// Lower-cases, strips the timeshift and HD markers, then drops all
/// whitespace: `"ITV1 +1"` and `"itv1"` share the key `"itv1"`.
pub fn normalize_callsign(callsign: &str) -> String {
    let mut key = callsign.to_lowercase();
    for marker in STRIPPED_MARKERS {
        key = key.replace(marker, "");
    }
    key.retain(|c| !c.is_whitespace());
    key
}

/// Selects a detection strategy from a channel callsign.
///
/// Channels on the silence list are analyzed by silence detection,
/// everything else goes to the external detector.
#[derive(Debug, Clone, Default)]
pub struct ChannelClassifier {
    silence_channels: HashSet<String>,
}

impl ChannelClassifier {
    /// Create a classifier from the configured silence channel list
    pub fn new<I, S>(silence_channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            silence_channels: silence_channels
                .into_iter()
                .map(|c| normalize_callsign(c.as_ref()))
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// Pick the strategy for a callsign. Never fails.
    pub fn classify(&self, callsign: &str) -> StrategyName {
        if self.silence_channels.contains(&normalize_callsign(callsign)) {
            StrategyName::SilenceAnalyzer
        } else {
            StrategyName::ExternalDetector
        }
    }

    /// Number of distinct normalized entries
    pub fn len(&self) -> usize {
        self.silence_channels.len()
    }

    /// Check if no channel is routed to silence analysis
    pub fn is_empty(&self) -> bool {
        self.silence_channels.is_empty()
    }
}
