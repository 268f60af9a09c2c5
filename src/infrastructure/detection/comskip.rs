//! Comskip commercial detector adapter

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::{info, warn};

use crate::application::ports::{CommercialDetector, DetectionError};
use crate::domain::channel::StrategyName;
use crate::domain::config::ComskipOutput;
use crate::domain::cutlist::{DetectionResult, FrameSegment};
use crate::infrastructure::process::ToolRunner;

use super::scratch::ScratchDir;

/// Comskip exit code for a clean run that found no breaks
const EXIT_NO_BREAKS: i32 = 1;

/// Base name comskip writes the frame cutlist under
const CUTLIST_NAME: &str = "cutlist";

static CUTLIST_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s+(\d+)").expect("cutlist pattern"));

static EDL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9.]+)\s+([0-9.]+)\s+\d").expect("edl pattern"));

static FRAME_RATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Frame Rate set to ([0-9.]+) f/s").expect("frame rate pattern"));

/// Runs comskip in a scratch directory and reads back its break list
pub struct ComskipDetector {
    runner: ToolRunner,
    ini: PathBuf,
    output: ComskipOutput,
}

impl ComskipDetector {
    pub fn new(runner: ToolRunner, ini: PathBuf, output: ComskipOutput) -> Self {
        Self {
            runner,
            ini,
            output,
        }
    }

    fn args(&self, recording: &Path, scratch: &Path) -> Vec<OsString> {
        let mut args = vec![
            prefixed("--ini=", &self.ini),
            prefixed("--output=", scratch),
        ];
        if self.output == ComskipOutput::Cutlist {
            args.push(format!("--output-filename={}", CUTLIST_NAME).into());
        }
        if is_transport_stream(recording) {
            args.push("--ts".into());
        }
        args.push(recording.into());
        args
    }

    fn output_file(&self, recording: &Path, scratch: &Path) -> PathBuf {
        match self.output {
            ComskipOutput::Cutlist => scratch.join(format!("{}.txt", CUTLIST_NAME)),
            ComskipOutput::Edl => {
                let stem = recording
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| CUTLIST_NAME.to_string());
                scratch.join(format!("{}.edl", stem))
            }
        }
    }

    fn output_error(&self, message: impl Into<String>) -> DetectionError {
        DetectionError::ToolOutput {
            tool: self.runner.program().to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl CommercialDetector for ComskipDetector {
    fn strategy(&self) -> StrategyName {
        StrategyName::ExternalDetector
    }

    async fn detect(&self, path: &Path) -> Result<DetectionResult, DetectionError> {
        let scratch = ScratchDir::new()?;
        let output = self.runner.run(self.args(path, scratch.path())).await?;

        match output.code() {
            Some(0) => {}
            Some(EXIT_NO_BREAKS) => {
                info!("comskip found no breaks");
                scratch.close();
                return Ok(DetectionResult::empty());
            }
            code => {
                return Err(DetectionError::ToolInvocation {
                    tool: self.runner.program().to_string(),
                    message: format!(
                        "exited with code {}: {}",
                        code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
                        output.stderr_tail()
                    ),
                });
            }
        }

        let file = self.output_file(path, scratch.path());
        let contents = tokio::fs::read_to_string(&file)
            .await
            .map_err(|e| self.output_error(format!("{}: {}", file.display(), e)))?;

        let segments = match self.output {
            ComskipOutput::Cutlist => parse_cutlist(&contents),
            ComskipOutput::Edl => {
                let fps = parse_frame_rate(&output.stdout)
                    .ok_or_else(|| self.output_error("no frame rate in output"))?;
                info!("fps:       {}", fps);
                parse_edl(&contents, fps)
            }
        };
        scratch.close();

        Ok(DetectionResult::from(segments))
    }
}

/// `--flag=<path>` without a lossy UTF-8 round trip
fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path);
    arg
}

fn is_transport_stream(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ts"))
}

/// Parse comskip's frame cutlist: one "start end" pair per line.
/// Header and separator lines are skipped.
pub fn parse_cutlist(contents: &str) -> Vec<FrameSegment> {
    contents
        .lines()
        .filter_map(|line| {
            let caps = CUTLIST_LINE.captures(line)?;
            let start = caps[1].parse().ok()?;
            let end = caps[2].parse().ok()?;
            segment(start, end)
        })
        .collect()
}

/// Frame rate from comskip's "Frame Rate set to X f/s" log line
pub fn parse_frame_rate(stdout: &str) -> Option<f64> {
    FRAME_RATE
        .captures(stdout)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|fps| fps.is_finite() && *fps > 0.0)
}

/// Parse an EDL file ("start end type", times in seconds) into frames.
///
/// Frame numbers are `floor(seconds * fps) + 1`.
pub fn parse_edl(contents: &str, fps: f64) -> Vec<FrameSegment> {
    contents
        .lines()
        .filter_map(|line| {
            let caps = EDL_LINE.captures(line)?;
            let start: f64 = caps[1].parse().ok()?;
            let end: f64 = caps[2].parse().ok()?;
            segment(seconds_to_frame(start, fps), seconds_to_frame(end, fps))
        })
        .collect()
}

fn seconds_to_frame(secs: f64, fps: f64) -> u64 {
    (secs * fps).max(0.0).floor() as u64 + 1
}

fn segment(start: u64, end: u64) -> Option<FrameSegment> {
    match FrameSegment::closed(start, end) {
        Ok(segment) => Some(segment),
        Err(e) => {
            warn!(error = %e, "skipping break");
            None
        }
    }
}
