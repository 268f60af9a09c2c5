//! Silence-analysis detector adapter (ffprobe + ffmpeg silencedetect)

use std::ffi::OsString;
use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::application::ports::{CommercialDetector, DetectionError};
use crate::domain::channel::StrategyName;
use crate::domain::cutlist::DetectionResult;
use crate::domain::silence::{select_audio_stream, AudioStream, SilenceCoalescer};
use crate::infrastructure::process::{ToolOutput, ToolRunner};

use super::scratch::ScratchDir;

/// Name of the extracted single-track audio file
const AUDIO_FILE: &str = "audio.mka";

static SILENCE_EVENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"silence_(start|end):\s*(-?[0-9.]+(?:[eE][-+]?[0-9]+)?)").expect("silencedetect pattern")
});

/// Silence detection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceSettings {
    /// Noise floor in dB
    pub threshold_db: f64,
    /// Shortest silence reported, in seconds
    pub min_silence_secs: f64,
}

/// Finds breaks from the silences bracketing them
pub struct SilenceAnalyzer {
    ffprobe: ToolRunner,
    ffmpeg: ToolRunner,
    settings: SilenceSettings,
    coalescer: SilenceCoalescer,
}

impl SilenceAnalyzer {
    pub fn new(
        ffprobe: ToolRunner,
        ffmpeg: ToolRunner,
        settings: SilenceSettings,
        coalescer: SilenceCoalescer,
    ) -> Self {
        Self {
            ffprobe,
            ffmpeg,
            settings,
            coalescer,
        }
    }

    async fn inspect_streams(&self, path: &Path) -> Result<AudioStream, DetectionError> {
        let mut args = os_args(&[
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
            "-select_streams",
            "a",
        ]);
        args.push(path.into());
        let output = self.ffprobe.run(args).await?;
        check_status(&self.ffprobe, &output)?;

        let streams = parse_streams(&output.stdout)
            .map_err(|e| DetectionError::NoAudioStream(format!("invalid ffprobe output: {}", e)))?;
        debug!(count = streams.len(), "listed audio streams");

        select_audio_stream(&streams).cloned().ok_or_else(|| {
            DetectionError::NoAudioStream(format!(
                "none of {} audio stream(s) in {} is usable",
                streams.len(),
                path.display()
            ))
        })
    }

    /// Copy the chosen stream, without re-encoding, into `target`
    async fn extract(
        &self,
        path: &Path,
        stream: &AudioStream,
        target: &Path,
    ) -> Result<(), DetectionError> {
        let mut args = os_args(&["-nostdin", "-hide_banner", "-loglevel", "error", "-y", "-i"]);
        args.push(path.into());
        args.extend(os_args(&["-map", &format!("0:{}", stream.index)]));
        args.extend(os_args(&["-vn", "-sn", "-dn", "-c:a", "copy"]));
        args.push(target.into());

        let output = self.ffmpeg.run(args).await?;
        check_status(&self.ffmpeg, &output)
    }

    async fn silences(&self, audio: &Path) -> Result<Vec<f64>, DetectionError> {
        let filter = format!(
            "silencedetect=noise={}dB:d={}",
            self.settings.threshold_db, self.settings.min_silence_secs
        );
        let mut args = os_args(&["-nostdin", "-hide_banner", "-i"]);
        args.push(audio.into());
        args.extend(os_args(&["-af", &filter, "-f", "null", "-"]));

        let output = self.ffmpeg.run(args).await?;
        check_status(&self.ffmpeg, &output)?;
        Ok(parse_silences(&output.stderr))
    }
}

#[async_trait]
impl CommercialDetector for SilenceAnalyzer {
    fn strategy(&self) -> StrategyName {
        StrategyName::SilenceAnalyzer
    }

    async fn detect(&self, path: &Path) -> Result<DetectionResult, DetectionError> {
        let stream = self.inspect_streams(path).await?;
        info!(index = stream.index, codec = %stream.codec, "selected audio stream");

        let scratch = ScratchDir::new()?;
        let audio = scratch.join(AUDIO_FILE);
        self.extract(path, &stream, &audio).await?;

        let events = self.silences(&audio).await?;
        scratch.close();
        info!(silences = events.len(), "silence detection finished");

        Ok(DetectionResult::from(self.coalescer.coalesce(&events)))
    }
}

fn os_args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

fn check_status(runner: &ToolRunner, output: &ToolOutput) -> Result<(), DetectionError> {
    if output.status.success() {
        return Ok(());
    }
    Err(DetectionError::ToolInvocation {
        tool: runner.program().to_string(),
        message: format!(
            "exited with code {}: {}",
            output
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string()),
            output.stderr_tail()
        ),
    })
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: u32,
    #[serde(default)]
    codec_name: Option<String>,
    #[serde(default)]
    disposition: FfprobeDisposition,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeDisposition {
    #[serde(default)]
    visual_impaired: u8,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    #[serde(default)]
    title: Option<String>,
}

/// Audio streams from `ffprobe -print_format json -show_streams` output
pub fn parse_streams(json: &str) -> Result<Vec<AudioStream>, serde_json::Error> {
    let listing: FfprobeOutput = serde_json::from_str(json)?;
    Ok(listing
        .streams
        .into_iter()
        .map(|s| AudioStream {
            index: s.index,
            codec: s.codec_name.unwrap_or_default(),
            visual_impaired: s.disposition.visual_impaired != 0,
            title: s.tags.title,
        })
        .collect())
}

/// Silence midpoints (seconds) from silencedetect's log.
///
/// A silence still open at end of stream counts at its start.
pub fn parse_silences(log: &str) -> Vec<f64> {
    let mut events = Vec::new();
    let mut open: Option<f64> = None;

    for caps in SILENCE_EVENT.captures_iter(log) {
        let Ok(value) = caps[2].parse::<f64>() else {
            continue;
        };
        match &caps[1] {
            "start" => {
                if let Some(start) = open.replace(value) {
                    events.push(start);
                }
            }
            _ => {
                let start = open.take().unwrap_or(value);
                events.push((start + value) / 2.0);
            }
        }
    }
    if let Some(start) = open {
        events.push(start);
    }
    events
}
