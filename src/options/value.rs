//! Option values and ordered option sets
//!
//! An [`OptionSet`] keeps insertion order, so the flags on the constructed
//! command line come out in the order the defaults and overrides were merged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::schema::{OptionRule, OptionSchema};

/// A single option value as it appears in configuration or on a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    /// Accepted on input only so the schema can reject it with a readable reason.
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl OptionValue {
    /// Short description of the value's shape, used in validation messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
            Self::List(_) => "list",
        }
    }

    /// Render the value as command-line tokens.
    ///
    /// Scalars produce exactly one token; lists produce one token per element,
    /// each of which is emitted behind its own copy of the flag.
    pub fn to_tokens(&self) -> Vec<String> {
        match self {
            Self::Bool(true) => vec!["1".to_string()],
            Self::Bool(false) => vec!["0".to_string()],
            Self::Integer(n) => vec![n.to_string()],
            Self::Float(f) => vec![f.to_string()],
            Self::Text(s) => vec![s.clone()],
            Self::List(items) => items.clone(),
        }
    }

    /// Parse a raw `key=value` right-hand side from the command line.
    ///
    /// The option's rule decides the target type. Names outside the vocabulary
    /// stay text so the schema can report them as unsupported. Commas are not
    /// separators: `--tag a,b` means something different to the executable than
    /// `--tag a --tag b`, so lists come from repeating the option.
    pub fn parse_cli(name: &str, raw: &str) -> Self {
        let Some(spec) = OptionSchema::lookup(name) else {
            return Self::Text(raw.to_string());
        };

        match spec.rule {
            OptionRule::NonNegativeInteger | OptionRule::PositiveInteger => raw
                .trim()
                .parse::<i64>()
                .map(Self::Integer)
                .unwrap_or_else(|_| Self::Text(raw.to_string())),
            OptionRule::Flag => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Self::Bool(true),
                "false" | "0" | "no" | "off" => Self::Bool(false),
                _ => Self::Text(raw.to_string()),
            },
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Combine with a later value for the same option into a list
    pub fn appended(self, next: OptionValue) -> Self {
        let mut items = self.into_items();
        items.extend(next.into_items());
        Self::List(items)
    }

    fn into_items(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            other => other.to_tokens(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => write!(f, "{}", s),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Insertion-ordered mapping from option name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(IndexMap<String, OptionValue>);

impl OptionSet {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert or replace an option. A replaced key keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Option<OptionValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.0.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Layer `overrides` over `defaults`.
    ///
    /// Defaults keep their order; a colliding key takes the override's value in
    /// place, and keys only present in the overrides are appended in order.
    pub fn merged(defaults: &OptionSet, overrides: &OptionSet) -> OptionSet {
        let mut merged = defaults.clone();
        for (name, value) in overrides.iter() {
            merged.insert(name, value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = OptionSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
