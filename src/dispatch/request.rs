//! Notification request and call-level argument checks

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::options::{OptionSet, OptionValue};

/// Longest title accepted, in characters
pub const MAX_TITLE_CHARS: usize = 255;

/// A single notification to hand to the executable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub endpoints: Vec<String>,
    pub title: Option<String>,
    pub body: String,
    #[serde(default)]
    pub options: OptionSet,
}

impl NotificationRequest {
    pub fn new<I, S>(endpoints: I, body: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
            title: None,
            body: body.into(),
            options: OptionSet::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(name, value);
        self
    }

    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }

    /// Check endpoints, title and body. Options are validated separately.
    pub fn validate(&self) -> AppResult<()> {
        if self.endpoints.is_empty() {
            return Err(AppError::invalid_argument(
                "endpoints",
                "at least one endpoint URL is required",
            ));
        }

        if let Some(index) = self.endpoints.iter().position(|e| e.is_empty()) {
            return Err(AppError::invalid_argument(
                "endpoints",
                format!("endpoint at position {} is empty", index),
            ));
        }

        if let Some(index) = self.endpoints.iter().position(|e| e.starts_with('-')) {
            return Err(AppError::invalid_argument(
                "endpoints",
                format!("endpoint at position {} looks like a flag", index),
            ));
        }

        if self.body.is_empty() {
            return Err(AppError::invalid_argument("body", "a message body is required"));
        }

        if let Some(title) = &self.title {
            let length = title.chars().count();
            if length > MAX_TITLE_CHARS {
                return Err(AppError::invalid_argument(
                    "title",
                    format!("{} characters exceeds the limit of {}", length, MAX_TITLE_CHARS),
                ));
            }
        }

        Ok(())
    }
}
