//! Subprocess runner shared by the tool adapters

use std::ffi::OsString;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::application::ports::{DetectionError, SkipListError};

/// Subprocess failures before an exit status is available
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("failed to run {tool}: {message}")]
    StartFailed { tool: String, message: String },

    #[error("{tool} timed out after {secs}s")]
    TimedOut { tool: String, secs: u64 },
}

impl From<ToolError> for DetectionError {
    fn from(e: ToolError) -> Self {
        match e {
            ToolError::NotFound(tool) => DetectionError::ToolNotFound { tool },
            ToolError::StartFailed { tool, message } => {
                DetectionError::ToolInvocation { tool, message }
            }
            ToolError::TimedOut { tool, secs } => DetectionError::TimedOut { tool, secs },
        }
    }
}

impl From<ToolError> for SkipListError {
    fn from(e: ToolError) -> Self {
        match e {
            ToolError::NotFound(tool) => SkipListError::ToolNotFound(tool),
            other => SkipListError::StartFailed(other.to_string()),
        }
    }
}

/// Captured result of a finished subprocess
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Exit code; None when killed by a signal
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Last non-empty stderr line, for error messages
    pub fn stderr_tail(&self) -> &str {
        self.stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("unknown error")
    }
}

/// Runs one external tool with a deadline
#[derive(Debug, Clone)]
pub struct ToolRunner {
    program: String,
    timeout: Duration,
}

impl ToolRunner {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run to completion, logging the command line and its stdout.
    ///
    /// On timeout the child is dropped, which kills it.
    pub async fn run<I, A>(&self, args: I) -> Result<ToolOutput, ToolError>
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        info!(
            "Running: {} {}",
            self.program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ToolError::NotFound(self.program.clone())
                } else {
                    ToolError::StartFailed {
                        tool: self.program.clone(),
                        message: e.to_string(),
                    }
                }
            })?;

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ToolError::TimedOut {
                tool: self.program.clone(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| ToolError::StartFailed {
                tool: self.program.clone(),
                message: e.to_string(),
            })?;

        let output = ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        for line in output.stdout.lines() {
            info!("{}", line);
        }
        debug!(program = %self.program, status = %output.status, "tool finished");

        Ok(output)
    }
}
