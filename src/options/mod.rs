//! Delivery options passed through to the apprise executable
//!
//! [`OptionSet`] carries values, [`OptionSchema`] decides whether they are
//! acceptable.

pub mod schema;
pub mod value;

pub use schema::{OptionRule, OptionSchema, OptionSpec, OPTION_SCHEMA};
pub use value::{OptionSet, OptionValue};
