//! Common test utilities and helpers
//!
//! Shared by the integration tests: a builder around the `apprise-dispatch`
//! binary and recording collaborators for driving the library directly.

#![allow(dead_code)]

use apprise_dispatch::dispatch::{FailureLog, ProcessOutput, ProcessRunner};
use apprise_dispatch::errors::AppResult;
use assert_cmd::Command;
use async_trait::async_trait;
use predicates::prelude::*;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Test command builder for the apprise-dispatch CLI
pub struct TestCommand {
    cmd: Command,
}

impl TestCommand {
    pub fn new() -> Self {
        let cmd = Command::cargo_bin("apprise-dispatch")
            .expect("Failed to find apprise-dispatch binary");
        Self { cmd }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.cmd.arg(arg.as_ref());
        }
        self
    }

    pub fn arg<S: AsRef<str>>(mut self, arg: S) -> Self {
        self.cmd.arg(arg.as_ref());
        self
    }

    /// Execute and expect success
    pub fn expect_success(mut self) -> TestAssertion {
        let assert = self.cmd.assert().success();
        TestAssertion { assert }
    }

    /// Execute and expect failure
    pub fn expect_failure(mut self) -> TestAssertion {
        let assert = self.cmd.assert().failure();
        TestAssertion { assert }
    }
}

impl Default for TestCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Test assertion wrapper with convenient methods
pub struct TestAssertion {
    assert: assert_cmd::assert::Assert,
}

impl TestAssertion {
    pub fn stdout_contains<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self.assert.stdout(predicate::str::contains(text.as_ref()));
        Self { assert }
    }

    pub fn stderr_contains<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self.assert.stderr(predicate::str::contains(text.as_ref()));
        Self { assert }
    }

    pub fn stdout_contains_all<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.assert = self.assert.stdout(predicate::str::contains(pattern.as_ref()));
        }
        Self { assert: self.assert }
    }

    pub fn done(self) -> assert_cmd::assert::Assert {
        self.assert
    }
}

/// Isolated project directory so tests never touch the user's global config
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub config_path: std::path::PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config_path = temp_dir.path().join(".apprise/config.toml");

        Self {
            temp_dir,
            config_path,
        }
    }

    pub fn project_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a command configured for this environment
    pub fn command(&self) -> TestCommand {
        TestCommand::new()
            .arg("--project")
            .arg(self.project_path().to_string_lossy().as_ref())
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Process runner that returns a canned result and records every argv
pub struct RecordingRunner {
    output: ProcessOutput,
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingRunner {
    pub fn new<I, S>(exit_code: i32, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            output: ProcessOutput::new(exit_code, lines),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The argv of the only call made
    pub fn single_call(&self) -> Vec<String> {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one process invocation");
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, argv: &[String]) -> AppResult<ProcessOutput> {
        self.calls.lock().unwrap().push(argv.to_vec());
        Ok(self.output.clone())
    }
}

/// Failure log that keeps every message
#[derive(Default)]
pub struct RecordingLog {
    messages: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl FailureLog for RecordingLog {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
