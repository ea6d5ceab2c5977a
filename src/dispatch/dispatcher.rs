//! Notification dispatcher
//!
//! Owns the executable path and the configured default options, and turns each
//! [`NotificationRequest`] into one run of the executable.

use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::command::CommandLine;
use super::log::{FailureLog, TracingFailureLog};
use super::request::NotificationRequest;
use super::runner::{ProcessRunner, SystemRunner};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::options::{OptionSchema, OptionSet};

/// Settings a dispatcher is constructed from
#[derive(Debug, Clone, PartialEq)]
pub struct DispatcherConfig {
    pub command: String,
    pub options: OptionSet,
    pub timeout_secs: Option<u64>,
}

impl DispatcherConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            options: OptionSet::new(),
            timeout_secs: None,
        }
    }

    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }
}

impl From<&Config> for DispatcherConfig {
    fn from(config: &Config) -> Self {
        Self {
            command: config.command.clone(),
            options: config.options.clone(),
            timeout_secs: Some(config.timeout_secs),
        }
    }
}

/// Outcome of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub success: bool,
    pub output: Vec<String>,
}

/// Sends notifications by invoking the apprise executable
pub struct Dispatcher {
    command: String,
    defaults: OptionSet,
    runner: Arc<dyn ProcessRunner>,
    log: Arc<dyn FailureLog>,
}

impl Dispatcher {
    /// Dispatcher backed by a real child process and `tracing` failure logs
    pub fn new(config: DispatcherConfig) -> Self {
        let runner = SystemRunner::from_timeout_secs(config.timeout_secs);
        Self::with_collaborators(config, Arc::new(runner), Arc::new(TracingFailureLog))
    }

    /// Dispatcher with explicit process and logging collaborators
    pub fn with_collaborators(
        config: DispatcherConfig,
        runner: Arc<dyn ProcessRunner>,
        log: Arc<dyn FailureLog>,
    ) -> Self {
        Self {
            command: config.command,
            defaults: config.options,
            runner,
            log,
        }
    }

    pub fn defaults(&self) -> &OptionSet {
        &self.defaults
    }

    /// Merge, validate and build the command line without running it
    pub fn prepare(&self, request: &NotificationRequest) -> AppResult<CommandLine> {
        let merged = OptionSet::merged(&self.defaults, &request.options);

        request.validate()?;
        OptionSchema::validate(&merged)?;

        Ok(CommandLine::build(&self.command, request, &merged))
    }

    /// Send one notification and wait for the executable to finish
    pub async fn dispatch(&self, request: &NotificationRequest) -> AppResult<DispatchResult> {
        let command = self.prepare(request)?;
        debug!("Running: {}", command);

        let output = self.runner.run(command.argv()).await?;

        if !output.success() {
            let err = AppError::notification_failed(output.exit_code, &output.lines);
            let message = format!(
                "Apprise command failed (exit {}): {}",
                output.exit_code,
                output.lines.join("\n")
            );
            let log = &self.log;
            if panic::catch_unwind(AssertUnwindSafe(|| log.error(&message))).is_err() {
                warn!("Failure log panicked while recording: {}", message);
            }
            return Err(err);
        }

        info!(
            "Notification dispatched to {} endpoint(s)",
            request.endpoints.len()
        );

        Ok(DispatchResult {
            success: true,
            output: output.lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::runner::ProcessOutput;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubRunner {
        output: ProcessOutput,
        calls: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl ProcessRunner for StubRunner {
        async fn run(&self, argv: &[String]) -> AppResult<ProcessOutput> {
            self.calls.lock().unwrap().push(argv.to_vec());
            Ok(self.output.clone())
        }
    }

    #[derive(Default)]
    struct NullLog;

    impl FailureLog for NullLog {
        fn error(&self, _message: &str) {}
    }

    fn dispatcher(defaults: OptionSet, output: ProcessOutput) -> (Dispatcher, Arc<StubRunner>) {
        let runner = Arc::new(StubRunner {
            output,
            calls: Mutex::new(Vec::new()),
        });
        let config = DispatcherConfig::new("apprise").with_options(defaults);
        let dispatcher = Dispatcher::with_collaborators(config, runner.clone(), Arc::new(NullLog));
        (dispatcher, runner)
    }

    #[test]
    fn test_from_config() {
        let config = Config::default();
        let dispatcher_config = DispatcherConfig::from(&config);
        assert_eq!(dispatcher_config.command, "apprise");
        assert_eq!(dispatcher_config.timeout_secs, Some(60));
    }

    #[test]
    fn test_prepare_applies_override() {
        let (dispatcher, _) = dispatcher(
            OptionSet::new().with("storage-mode", "auto"),
            ProcessOutput::default(),
        );
        let request = NotificationRequest::new(["json://localhost"], "hi")
            .with_option("storage-mode", "flush");

        let command = dispatcher.prepare(&request).unwrap();
        assert!(command.argv().ends_with(&["--storage-mode".to_string(), "flush".to_string()]));
        assert!(!command.argv().contains(&"auto".to_string()));
    }

    #[test]
    fn test_argument_errors_checked_before_options() {
        let (dispatcher, _) = dispatcher(
            OptionSet::new().with("colour", "blue"),
            ProcessOutput::default(),
        );
        let request = NotificationRequest::new(["json://localhost"], "");

        let err = dispatcher.prepare(&request).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument { .. }));
    }

    #[test]
    fn test_invalid_defaults_surface_at_call_time() {
        let (dispatcher, _) = dispatcher(
            OptionSet::new().with("storage-uid-length", 0),
            ProcessOutput::default(),
        );
        assert_eq!(dispatcher.defaults().len(), 1);

        let request = NotificationRequest::new(["json://localhost"], "hi");
        let err = dispatcher.prepare(&request).unwrap_err();
        assert_eq!(err.option_name(), Some("storage-uid-length"));
    }

    #[tokio::test]
    async fn test_dispatch_success_returns_output() {
        let (dispatcher, runner) = dispatcher(OptionSet::new(), ProcessOutput::new(0, ["sent"]));
        let request = NotificationRequest::new(["json://localhost"], "hi");

        let result = dispatcher.dispatch(&request).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, vec!["sent"]);
        assert_eq!(runner.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_failure_carries_exit_code() {
        let (dispatcher, _) = dispatcher(OptionSet::new(), ProcessOutput::new(2, ["boom"]));
        let request = NotificationRequest::new(["json://localhost"], "hi");

        match dispatcher.dispatch(&request).await {
            Err(AppError::NotificationFailed { exit_code, output }) => {
                assert_eq!(exit_code, 2);
                assert_eq!(output, "boom");
            }
            other => panic!("Expected NotificationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_result_json_shape() {
        let result = DispatchResult {
            success: true,
            output: vec!["Notification sent".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "output": ["Notification sent"]}));
    }
}
