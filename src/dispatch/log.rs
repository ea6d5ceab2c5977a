//! Failure logging sink

use tracing::error;

/// Receives a message whenever a dispatch fails at the process level.
///
/// The dispatch error is returned regardless of what the sink does with the
/// message. A panic inside the sink is caught by the dispatcher.
pub trait FailureLog: Send + Sync {
    fn error(&self, message: &str);
}

/// Forwards failures to `tracing` at error level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFailureLog;

impl FailureLog for TracingFailureLog {
    fn error(&self, message: &str) {
        error!(target: "apprise_dispatch", "{}", message);
    }
}
