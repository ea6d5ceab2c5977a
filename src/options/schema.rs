//! Closed option vocabulary and per-option validation rules
//!
//! The vocabulary mirrors the flags accepted by the `apprise` CLI. Adding a
//! flag means adding one [`OptionSpec`] row to [`OPTION_SCHEMA`].

use std::fmt;

use super::value::{OptionSet, OptionValue};
use crate::errors::{AppError, AppResult};

/// Validation rule attached to an option name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRule {
    /// Non-empty string
    NonEmptyText,
    /// Integer >= 0
    NonNegativeInteger,
    /// Integer > 0
    PositiveInteger,
    /// String drawn from a fixed set
    OneOf(&'static [&'static str]),
    /// A list, or a single syntactically valid URL
    UrlOrList,
    /// A string, or a list of strings
    TextOrList,
    /// Boolean
    Flag,
}

impl OptionRule {
    /// Check a value against this rule, returning a readable reason on failure
    pub fn check(&self, value: &OptionValue) -> Result<(), String> {
        match (self, value) {
            (Self::NonEmptyText, OptionValue::Text(s)) if !s.is_empty() => Ok(()),
            (Self::NonEmptyText, OptionValue::Text(_)) => Err("must not be empty".to_string()),

            (Self::NonNegativeInteger, OptionValue::Integer(n)) if *n >= 0 => Ok(()),
            (Self::NonNegativeInteger, OptionValue::Integer(n)) => {
                Err(format!("must be an integer >= 0, got {}", n))
            }

            (Self::PositiveInteger, OptionValue::Integer(n)) if *n > 0 => Ok(()),
            (Self::PositiveInteger, OptionValue::Integer(n)) => {
                Err(format!("must be an integer > 0, got {}", n))
            }

            (Self::OneOf(allowed), OptionValue::Text(s)) if allowed.iter().any(|a| *a == s) => {
                Ok(())
            }
            (Self::OneOf(allowed), OptionValue::Text(s)) => Err(format!(
                "'{}' is not one of: {}",
                s,
                allowed.join(", ")
            )),

            (Self::UrlOrList | Self::TextOrList, OptionValue::List(items)) => check_list(items),
            (Self::UrlOrList, OptionValue::Text(s)) => url::Url::parse(s)
                .map(|_| ())
                .map_err(|e| format!("'{}' is not a valid URL: {}", s, e)),

            (Self::TextOrList, OptionValue::Text(_)) => Ok(()),

            (Self::Flag, OptionValue::Bool(_)) => Ok(()),

            (rule, other) => Err(format!("expected {}, got {} '{}'", rule, other.kind(), other)),
        }
    }

    /// True when repeated values accumulate into a list
    pub fn accepts_list(&self) -> bool {
        matches!(self, Self::UrlOrList | Self::TextOrList)
    }
}

fn check_list(items: &[String]) -> Result<(), String> {
    if items.is_empty() {
        return Err("list must not be empty".to_string());
    }
    match items.iter().position(|item| item.is_empty()) {
        Some(index) => Err(format!("list entry at position {} is empty", index)),
        None => Ok(()),
    }
}

impl fmt::Display for OptionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonEmptyText => write!(f, "non-empty string"),
            Self::NonNegativeInteger => write!(f, "integer >= 0"),
            Self::PositiveInteger => write!(f, "integer > 0"),
            Self::OneOf(allowed) => write!(f, "one of {{{}}}", allowed.join(", ")),
            Self::UrlOrList => write!(f, "URL or list"),
            Self::TextOrList => write!(f, "string or list of strings"),
            Self::Flag => write!(f, "boolean"),
        }
    }
}

/// One row of the option vocabulary
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub name: &'static str,
    pub rule: OptionRule,
    pub description: &'static str,
}

const STORAGE_MODES: &[&str] = &["auto", "flush", "memory"];
const NOTIFICATION_TYPES: &[&str] = &["info", "success", "warning", "failure"];
const INPUT_FORMATS: &[&str] = &["text", "html", "markdown"];

/// Every option the dispatcher will pass through to the executable
pub const OPTION_SCHEMA: &[OptionSpec] = &[
    OptionSpec {
        name: "plugin-path",
        rule: OptionRule::NonEmptyText,
        description: "Path to custom plugins",
    },
    OptionSpec {
        name: "storage-path",
        rule: OptionRule::NonEmptyText,
        description: "Path to the persistent storage location",
    },
    OptionSpec {
        name: "storage-prune-days",
        rule: OptionRule::NonNegativeInteger,
        description: "Days to keep stored notification data",
    },
    OptionSpec {
        name: "storage-uid-length",
        rule: OptionRule::PositiveInteger,
        description: "Length of generated storage UIDs",
    },
    OptionSpec {
        name: "storage-mode",
        rule: OptionRule::OneOf(STORAGE_MODES),
        description: "Persistent storage mode",
    },
    OptionSpec {
        name: "attach",
        rule: OptionRule::UrlOrList,
        description: "Files or URLs to attach",
    },
    OptionSpec {
        name: "notification-type",
        rule: OptionRule::OneOf(NOTIFICATION_TYPES),
        description: "Notification type",
    },
    OptionSpec {
        name: "input-format",
        rule: OptionRule::OneOf(INPUT_FORMATS),
        description: "Format of the message body",
    },
    OptionSpec {
        name: "tag",
        rule: OptionRule::TextOrList,
        description: "Tags used to filter configured endpoints",
    },
    OptionSpec {
        name: "disable-async",
        rule: OptionRule::Flag,
        description: "Send notifications sequentially",
    },
    OptionSpec {
        name: "dry-run",
        rule: OptionRule::Flag,
        description: "Resolve endpoints without sending",
    },
    OptionSpec {
        name: "recursion-depth",
        rule: OptionRule::NonNegativeInteger,
        description: "Maximum include recursion depth",
    },
    OptionSpec {
        name: "verbose",
        rule: OptionRule::NonNegativeInteger,
        description: "Verbosity level",
    },
    OptionSpec {
        name: "interpret-escapes",
        rule: OptionRule::Flag,
        description: "Interpret backslash escapes in the body",
    },
    OptionSpec {
        name: "interpret-emojis",
        rule: OptionRule::Flag,
        description: "Interpret :emoji: codes",
    },
    OptionSpec {
        name: "debug",
        rule: OptionRule::Flag,
        description: "Enable debug output",
    },
];

/// Stateless view over [`OPTION_SCHEMA`]
pub struct OptionSchema;

impl OptionSchema {
    /// All known options, in table order
    pub fn specs() -> &'static [OptionSpec] {
        OPTION_SCHEMA
    }

    pub fn lookup(name: &str) -> Option<&'static OptionSpec> {
        OPTION_SCHEMA.iter().find(|spec| spec.name == name)
    }

    /// Validate a single option
    pub fn validate_option(name: &str, value: &OptionValue) -> AppResult<()> {
        let spec = Self::lookup(name).ok_or_else(|| AppError::unsupported_option(name))?;
        spec.rule
            .check(value)
            .map_err(|reason| AppError::option_validation(name, reason))
    }

    /// Validate a merged option set, stopping at the first violation
    pub fn validate(options: &OptionSet) -> AppResult<()> {
        for (name, value) in options.iter() {
            Self::validate_option(name, value)?;
        }
        Ok(())
    }
}
