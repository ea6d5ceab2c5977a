//! Process execution seam
//!
//! The dispatcher talks to the outside world only through [`ProcessRunner`],
//! which makes the external executable swappable in tests.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

/// Exit status and captured output of one process run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    /// stdout lines followed by stderr lines, in order
    pub lines: Vec<String>,
}

impl ProcessOutput {
    pub fn new<I, S>(exit_code: i32, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exit_code,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a fully built argument vector and reports how it went
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `argv` (`argv[0]` is the program) to completion
    async fn run(&self, argv: &[String]) -> AppResult<ProcessOutput>;
}

/// Runs the executable as a child process, without a shell
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Kill the child and fail if it has not exited after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout: Some(timeout) }
    }

    /// `None` or zero seconds disables the timeout
    pub fn from_timeout_secs(timeout_secs: Option<u64>) -> Self {
        match timeout_secs {
            Some(secs) if secs > 0 => Self::with_timeout(Duration::from_secs(secs)),
            _ => Self::new(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, argv: &[String]) -> AppResult<ProcessOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| AppError::invalid_argument("argv", "no program to run"))?;

        debug!("Spawning {} with {} arguments", program, args.len());

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::process_execution_with_source(program.clone(), e))?;

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("{} did not exit within {:?}, killing it", program, limit);
                    return Err(AppError::ProcessTimeout {
                        command: program.clone(),
                        timeout: limit,
                    });
                }
            },
            None => child.wait_with_output().await,
        }
        .map_err(|e| AppError::process_execution_with_source(program.clone(), e))?;

        // A child killed by a signal has no exit code.
        let exit_code = output.status.code().unwrap_or(-1);
        let mut lines = split_lines(&output.stdout);
        lines.extend(split_lines(&output.stderr));

        Ok(ProcessOutput { exit_code, lines })
    }
}
