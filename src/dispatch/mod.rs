//! Notification dispatch through the apprise executable
//!
//! A [`Dispatcher`] merges request options over its defaults, validates them,
//! builds a [`CommandLine`] and hands it to a [`ProcessRunner`].

pub mod command;
pub mod dispatcher;
pub mod log;
pub mod request;
pub mod runner;

pub use command::{shell_quote, CommandLine};
pub use dispatcher::{DispatchResult, Dispatcher, DispatcherConfig};
pub use log::{FailureLog, TracingFailureLog};
pub use request::{NotificationRequest, MAX_TITLE_CHARS};
pub use runner::{ProcessOutput, ProcessRunner, SystemRunner};
