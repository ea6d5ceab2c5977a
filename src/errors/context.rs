//! Error context enhancement utilities
//!
//! Folds foreign I/O errors into [`AppError`] together with the file and the
//! operation that was being attempted.

use std::path::PathBuf;
use super::types::AppError;

/// Extension trait for adding file context to error types
pub trait ErrorContextExt<T> {
    /// Add operation and file context
    fn in_file_operation(
        self,
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
    ) -> Result<T, AppError>;
}

impl<T, E> ErrorContextExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn in_file_operation(
        self,
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
    ) -> Result<T, AppError> {
        self.map_err(|e| AppError::io_with_source(path, operation, e))
    }
}
