//! Error types for slot-grid operations.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The event does not end strictly after it starts.
    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// A timestamp string could not be interpreted as a local date-time.
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// Splitting the event at midnight would produce more day fragments than allowed.
    #[error("Event spans more than {max_days} days (starts {start})")]
    SpanTooLong {
        start: NaiveDateTime,
        max_days: u32,
    },

    /// Date arithmetic left the representable calendar range.
    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
