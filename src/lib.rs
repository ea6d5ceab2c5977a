//! Apprise Dispatch Library
//!
//! Builds validated, shell-safe invocations of the `apprise` notification CLI
//! and maps the outcome to a structured result or a typed error.

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod options;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigManager};
pub use dispatch::{DispatchResult, Dispatcher, DispatcherConfig, NotificationRequest};
pub use errors::{AppError, AppResult};
pub use options::{OptionSchema, OptionSet, OptionValue};
