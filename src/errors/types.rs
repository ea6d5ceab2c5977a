//! Error types for apprise-dispatch
//!
//! Every failure a dispatch can surface is a variant of [`AppError`], grouped by
//! the stage that produced it.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // Call-level input errors
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        argument: String,
        reason: String,
    },

    // Option schema errors
    #[error("Unsupported option: '{option}'")]
    UnsupportedOption {
        option: String,
    },

    #[error("Invalid value for option '{option}': {reason}")]
    OptionValidation {
        option: String,
        reason: String,
    },

    // External process errors
    #[error("Failed to send notification: {output}")]
    NotificationFailed {
        exit_code: i32,
        output: String,
    },

    #[error("Process execution failed: {command}")]
    ProcessExecution {
        command: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Process '{command}' timed out after {timeout:?}")]
    ProcessTimeout {
        command: String,
        timeout: Duration,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unknown configuration key: {key}")]
    UnknownConfigKey {
        key: String,
    },

    #[error("TOML parsing error: {context}")]
    TomlParsing {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // I/O errors
    #[error("File I/O error for '{path}': {operation}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new InvalidArgument error
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Create a new UnsupportedOption error
    pub fn unsupported_option(option: impl Into<String>) -> Self {
        Self::UnsupportedOption {
            option: option.into(),
        }
    }

    /// Create a new OptionValidation error
    pub fn option_validation(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OptionValidation {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Create a new NotificationFailed error from the captured output lines
    pub fn notification_failed(exit_code: i32, lines: &[String]) -> Self {
        Self::NotificationFailed {
            exit_code,
            output: lines.join("\n"),
        }
    }

    /// Create a new ProcessExecution error with source
    pub fn process_execution_with_source(
        command: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ProcessExecution {
            command: command.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new I/O error with source
    pub fn io_with_source(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The option name carried by option errors, if any
    pub fn option_name(&self) -> Option<&str> {
        match self {
            Self::UnsupportedOption { option } | Self::OptionValidation { option, .. } => {
                Some(option)
            }
            _ => None,
        }
    }

    /// True for errors raised by the option schema
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedOption { .. } | Self::OptionValidation { .. }
        )
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "argument",
            Self::UnsupportedOption { .. } | Self::OptionValidation { .. } => "option",
            Self::NotificationFailed { .. } => "notification",
            Self::ProcessExecution { .. } | Self::ProcessTimeout { .. } => "process",
            Self::Config { .. } | Self::UnknownConfigKey { .. } | Self::TomlParsing { .. } => "config",
            Self::Io { .. } => "io",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let operation = match err.kind() {
            std::io::ErrorKind::NotFound => "file not found",
            std::io::ErrorKind::PermissionDenied => "permission denied",
            _ => "I/O operation",
        }
        .to_string();

        Self::Io {
            path: PathBuf::from("unknown"),
            operation,
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::TomlParsing {
            context: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
