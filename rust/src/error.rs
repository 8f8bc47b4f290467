//! Error types for input validation.
//!
//! Queries against a built grid never fail; they answer with sentinels instead.
//! Errors only arise when constructing inputs or configuration.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while validating grid inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Assignment {id:?} ends ({end}) before it starts ({start})")]
    InvertedRange {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    #[error("Assignment {id:?} has invalid hours per day: {hours}")]
    InvalidHours { id: String, hours: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Date arithmetic out of range from {0}")]
    DateOutOfRange(NaiveDate),
}

pub type GridResult<T> = Result<T, GridError>;
