//! Error types for catalog resolution and field editing.

use thiserror::Error;

/// Errors raised while building the check catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A nested group declared another nested group as a child.
    #[error("nested group '{group}' cannot contain nested group '{child}'")]
    NestingTooDeep { group: String, child: String },

    /// A numeric range pair appeared outside a nested group.
    #[error("range field '{key}' must live inside a nested group")]
    RangeOutsideGroup { key: String },

    /// Two catalog entries share a check name.
    #[error("check '{0}' is listed more than once")]
    DuplicateCheck(String),
}

/// Errors raised when an edit does not fit its field's kind.
///
/// A rejected edit never changes the model.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("column '{column}' is not in the uploaded data (field '{key}')")]
    UnknownColumn { key: String, column: String },

    #[error("field '{key}' lists column '{column}' more than once")]
    DuplicateColumn { key: String, column: String },

    #[error("field '{key}' expects {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("'{value}' is not a valid option for '{key}' (expected one of: {options})")]
    InvalidOption {
        key: String,
        value: String,
        options: String,
    },

    #[error("{value} is outside the allowed range {min}..={max} for '{key}'")]
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("start {start} is after end {end} in '{key}'")]
    InvertedRange { key: String, start: f64, end: f64 },

    #[error("'{group}' has no field named '{child}'")]
    UnknownChild { group: String, child: String },

    #[error("'{key}' is not a nested group")]
    NotAGroup { key: String },

    #[error("'{key}' is not a column list")]
    NotAColumnList { key: String },

    #[error("invalid JSON for '{key}': {reason}")]
    InvalidJson { key: String, reason: String },
}
