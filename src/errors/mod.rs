//! Centralized error handling module
//!
//! Library code returns [`AppResult`]; the binary converts to `anyhow` at the
//! command boundary.

pub mod types;
pub mod context;

pub use types::{AppError, AppResult};
pub use context::ErrorContextExt;
