//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::domain::config::AppConfig;
use crate::domain::job::{FlagTarget, JobId, RecordingKey, StartTime};

/// commflag-wrapper - commercial flagging job for MythTV recordings
#[derive(Parser, Debug)]
#[command(name = "commflag-wrapper")]
#[command(version)]
#[command(about = "Flag commercial breaks in MythTV recordings with comskip or silence detection")]
#[command(long_about = None)]
#[command(group(ArgGroup::new("target").required(true).args(["jobid", "chanid"])))]
pub struct Cli {
    /// Job queue entry to run (as passed by mythbackend's %JOBID%)
    #[arg(long, value_name = "ID")]
    pub jobid: Option<u32>,

    /// Channel id of a recording to flag without a job
    #[arg(long, value_name = "ID", requires = "starttime")]
    pub chanid: Option<u32>,

    /// Recording start time in UTC
    #[arg(long, value_name = "YYYYmmddHHMMSS", requires = "chanid")]
    pub starttime: Option<StartTime>,

    /// Log level (trace, debug, info, warning, error, critical)
    #[arg(long, value_name = "LEVEL")]
    pub loglevel: Option<String>,

    /// Log file to append to
    #[arg(long, value_name = "FILE")]
    pub logfile: Option<PathBuf>,

    /// Tuning config file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// MythTV config.xml with the database connection settings
    #[arg(long, value_name = "FILE")]
    pub mythtv_config: Option<PathBuf>,
}

impl Cli {
    /// Recording to flag; None only if clap's target group was bypassed
    pub fn target(&self) -> Option<FlagTarget> {
        match (self.jobid, self.chanid, self.starttime) {
            (Some(job), _, _) => Some(FlagTarget::Job(JobId(job))),
            (None, Some(chanid), Some(starttime)) => {
                Some(FlagTarget::Recording(RecordingKey { chanid, starttime }))
            }
            _ => None,
        }
    }

    /// Config overrides given on the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            log_file: self.logfile.clone(),
            log_level: self.loglevel.clone(),
            ..Default::default()
        }
    }
}
