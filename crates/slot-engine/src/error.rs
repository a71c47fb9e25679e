//! Error types for slot-engine operations.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A busy interval whose start is not strictly before its end.
    #[error("Malformed busy interval: start {start} is not before end {end}")]
    MalformedInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The calendar source failed to deliver busy intervals.
    #[error("Calendar source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
