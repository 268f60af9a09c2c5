//! Application configuration value object

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::{ConfigError, InvalidOutputFormatError};
use crate::domain::silence::DEFAULT_MAX_COMM_BREAK_SECS;

pub const DEFAULT_LOG_FILE: &str = "/var/log/mythtv/mythcommflag.log";
pub const DEFAULT_COMSKIP_PATH: &str = "comskip";
pub const DEFAULT_COMSKIP_INI: &str = "/etc/commflag-wrapper/comskip.ini";
pub const DEFAULT_THRESHOLD_DB: f64 = -75.0;
pub const DEFAULT_MIN_SILENCE_SECS: f64 = 0.15;
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 4 * 60 * 60;

/// Output file comskip is asked to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComskipOutput {
    /// `<stem>.txt` with `start end` frame pairs
    #[default]
    Cutlist,
    /// `<recording>.edl` with `start end type` second triples
    Edl,
}

impl ComskipOutput {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cutlist => "cutlist",
            Self::Edl => "edl",
        }
    }
}

impl FromStr for ComskipOutput {
    type Err = InvalidOutputFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cutlist" => Ok(Self::Cutlist),
            "edl" => Ok(Self::Edl),
            _ => Err(InvalidOutputFormatError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ComskipOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// External tool locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolsConfig {
    pub comskip: Option<String>,
    pub comskip_ini: Option<PathBuf>,
    pub comskip_output: Option<String>,
    pub ffmpeg: Option<String>,
    pub ffprobe: Option<String>,
    pub mythutil: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Callsigns analyzed by silence detection instead of comskip
    pub silence_channels: Option<Vec<String>>,
    pub threshold_db: Option<f64>,
    pub min_silence_secs: Option<f64>,
    pub max_comm_break_secs: Option<f64>,
    pub tool_timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub tools: Option<ToolsConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            silence_channels: Some(Vec::new()),
            threshold_db: Some(DEFAULT_THRESHOLD_DB),
            min_silence_secs: Some(DEFAULT_MIN_SILENCE_SECS),
            max_comm_break_secs: Some(DEFAULT_MAX_COMM_BREAK_SECS),
            tool_timeout_secs: Some(DEFAULT_TOOL_TIMEOUT_SECS),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            log_level: Some("info".to_string()),
            tools: Some(ToolsConfig {
                comskip: Some(DEFAULT_COMSKIP_PATH.to_string()),
                comskip_ini: Some(PathBuf::from(DEFAULT_COMSKIP_INI)),
                comskip_output: Some(ComskipOutput::default().to_string()),
                ffmpeg: Some("ffmpeg".to_string()),
                ffprobe: Some("ffprobe".to_string()),
                mythutil: Some("mythutil".to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            silence_channels: other.silence_channels.or(self.silence_channels),
            threshold_db: other.threshold_db.or(self.threshold_db),
            min_silence_secs: other.min_silence_secs.or(self.min_silence_secs),
            max_comm_break_secs: other.max_comm_break_secs.or(self.max_comm_break_secs),
            tool_timeout_secs: other.tool_timeout_secs.or(self.tool_timeout_secs),
            log_file: other.log_file.or(self.log_file),
            log_level: other.log_level.or(self.log_level),
            tools: Self::merge_tools_config(self.tools, other.tools),
        }
    }

    /// Merge tool sections
    fn merge_tools_config(
        base: Option<ToolsConfig>,
        other: Option<ToolsConfig>,
    ) -> Option<ToolsConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(ToolsConfig {
                comskip: o.comskip.or(b.comskip),
                comskip_ini: o.comskip_ini.or(b.comskip_ini),
                comskip_output: o.comskip_output.or(b.comskip_output),
                ffmpeg: o.ffmpeg.or(b.ffmpeg),
                ffprobe: o.ffprobe.or(b.ffprobe),
                mythutil: o.mythutil.or(b.mythutil),
            }),
        }
    }

    /// Check values that would make detection meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(secs) = self.max_comm_break_secs {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ConfigError::ValidationError {
                    key: "max_comm_break_secs".to_string(),
                    message: format!("must be a non-negative number of seconds, got {}", secs),
                });
            }
        }
        if let Some(secs) = self.min_silence_secs {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(ConfigError::ValidationError {
                    key: "min_silence_secs".to_string(),
                    message: format!("must be a positive number of seconds, got {}", secs),
                });
            }
        }
        if let Some(db) = self.threshold_db {
            if !db.is_finite() || db > 0.0 {
                return Err(ConfigError::ValidationError {
                    key: "threshold_db".to_string(),
                    message: format!("must be a dB level at or below 0, got {}", db),
                });
            }
        }
        if self.tool_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError {
                key: "tool_timeout_secs".to_string(),
                message: "must be a positive number of seconds, got 0".to_string(),
            });
        }
        if let Some(format) = self.tools.as_ref().and_then(|t| t.comskip_output.as_ref()) {
            format
                .parse::<ComskipOutput>()
                .map_err(|e| ConfigError::ValidationError {
                    key: "tools.comskip_output".to_string(),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Get silence channel list, or empty if not set
    pub fn silence_channels_or_default(&self) -> &[String] {
        self.silence_channels.as_deref().unwrap_or(&[])
    }

    pub fn threshold_db_or_default(&self) -> f64 {
        self.threshold_db.unwrap_or(DEFAULT_THRESHOLD_DB)
    }

    pub fn min_silence_secs_or_default(&self) -> f64 {
        self.min_silence_secs.unwrap_or(DEFAULT_MIN_SILENCE_SECS)
    }

    pub fn max_comm_break_secs_or_default(&self) -> f64 {
        self.max_comm_break_secs
            .unwrap_or(DEFAULT_MAX_COMM_BREAK_SECS)
    }

    /// Get subprocess timeout, or 4 hours if not set
    pub fn tool_timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs.unwrap_or(DEFAULT_TOOL_TIMEOUT_SECS))
    }

    pub fn log_file_or_default(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn comskip_or_default(&self) -> &str {
        self.tool(|t| t.comskip.as_deref())
            .unwrap_or(DEFAULT_COMSKIP_PATH)
    }

    pub fn comskip_ini_or_default(&self) -> PathBuf {
        self.tools
            .as_ref()
            .and_then(|t| t.comskip_ini.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMSKIP_INI))
    }

    /// Get comskip output format, or cutlist if not set/invalid
    pub fn comskip_output_or_default(&self) -> ComskipOutput {
        self.tool(|t| t.comskip_output.as_deref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn ffmpeg_or_default(&self) -> &str {
        self.tool(|t| t.ffmpeg.as_deref()).unwrap_or("ffmpeg")
    }

    pub fn ffprobe_or_default(&self) -> &str {
        self.tool(|t| t.ffprobe.as_deref()).unwrap_or("ffprobe")
    }

    pub fn mythutil_or_default(&self) -> &str {
        self.tool(|t| t.mythutil.as_deref()).unwrap_or("mythutil")
    }

    fn tool<'a>(&'a self, pick: impl Fn(&'a ToolsConfig) -> Option<&'a str>) -> Option<&'a str> {
        self.tools.as_ref().and_then(pick)
    }
}
