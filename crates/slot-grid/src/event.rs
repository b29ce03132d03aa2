//! Input events, per-day fragments, and timestamp parsing.
//!
//! Timestamps are local wall-clock times. An RFC 3339 string carrying an offset
//! is reduced to the wall-clock time in that offset; no timezone conversion is
//! performed.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{LayoutError, Result};

/// Formats accepted for timestamps without an explicit offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A time-stamped item to lay out (a shift, a care task, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl Event {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Check that the event ends strictly after it starts.
    ///
    /// # Errors
    /// Returns `LayoutError::InvalidInterval` when `end <= start`.
    pub fn validate(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(LayoutError::InvalidInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// An event as delivered by the CRUD layer, before timestamp parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub label: String,
}

impl EventRecord {
    /// Parse both timestamps and validate the interval.
    ///
    /// # Errors
    /// Returns `LayoutError::InvalidTimestamp` if either timestamp is malformed and
    /// `LayoutError::InvalidInterval` if the parsed interval is empty or reversed.
    pub fn parse(&self) -> Result<Event> {
        let event = Event::new(
            parse_timestamp(&self.start)?,
            parse_timestamp(&self.end)?,
            self.label.clone(),
        );
        event.validate()?;
        Ok(event)
    }
}

/// Parse an ISO 8601 timestamp into a local wall-clock `NaiveDateTime`.
///
/// Accepts RFC 3339 with an offset (e.g. "2026-03-02T09:00:00+01:00", kept as
/// 09:00) and naive forms with or without seconds, using `T` or a space as the
/// date/time separator.
///
/// # Errors
/// Returns `LayoutError::InvalidTimestamp` if no accepted form matches.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    let mut last_error = None;
    for format in NAIVE_FORMATS {
        match NaiveDateTime::parse_from_str(trimmed, format) {
            Ok(ndt) => return Ok(ndt),
            Err(e) => last_error = Some(e),
        }
    }
    Err(LayoutError::InvalidTimestamp {
        value: value.to_string(),
        reason: last_error.map_or_else(|| "empty timestamp".to_string(), |e| e.to_string()),
    })
}

/// A calendar date used as the outer key of the grid.
///
/// Displays and serializes as `day/month/year` without zero padding
/// (e.g. `2/3/2026`), and orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.0.day(), self.0.month(), self.0.year())
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The portion of an [`Event`] confined to a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventFragment {
    /// Position of the source event in the sorted sequence of laid-out events.
    pub event_index: usize,
    pub start: NaiveDateTime,
    /// Exclusive end; equals the following local midnight for fragments cut by a split.
    pub end: NaiveDateTime,
    pub label: String,
    pub day: DayKey,
    pub weekday: Weekday,
    /// The fragment starts where the source event starts.
    pub is_head: bool,
    /// The fragment ends where the source event ends.
    pub is_tail: bool,
}

impl EventFragment {
    /// Monday-first index of the fragment's weekday (Monday = 0, Sunday = 6).
    pub fn weekday_index(&self) -> u32 {
        self.weekday.num_days_from_monday()
    }
}
