//! Event normalization -- sorting and splitting events at local midnight.
//!
//! Valid events are stably sorted by start time and each one is cut into one
//! fragment per calendar day it touches. Fragments are produced into a fresh
//! vector and sorted afterwards, so the later layout stages only ever read a
//! finished sequence.

use chrono::{NaiveDateTime, NaiveTime};
use log::warn;
use serde::{Serialize, Serializer};

use crate::error::{LayoutError, Result};
use crate::event::{DayKey, Event, EventFragment};

/// An event that made it into the layout, with its position in the caller's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedEvent {
    pub input_index: usize,
    pub event: Event,
}

/// An event excluded from the layout, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEvent {
    /// Position of the event in the caller's input.
    pub input_index: usize,
    pub label: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: LayoutError,
}

fn serialize_error<S: Serializer>(
    error: &LayoutError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Output of [`normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Laid-out events in start order. A fragment's `event_index` indexes this vector.
    pub events: Vec<IndexedEvent>,
    /// All fragments, stably sorted by fragment start.
    pub fragments: Vec<EventFragment>,
    /// Excluded events, in input order.
    pub rejected: Vec<RejectedEvent>,
}

/// Sort events by start time and split each into per-day fragments.
///
/// Events with `end <= start`, or spanning more than `max_span_days` calendar
/// days, are excluded and reported in [`Normalized::rejected`]; the remaining
/// events are still normalized.
pub fn normalize(events: &[Event], max_span_days: u32) -> Normalized {
    normalize_indexed(events.iter().cloned().enumerate().collect(), max_span_days)
}

/// Like [`normalize`], for events already tagged with their input position.
pub(crate) fn normalize_indexed(events: Vec<(usize, Event)>, max_span_days: u32) -> Normalized {
    let mut rejected = Vec::new();
    let mut valid = Vec::with_capacity(events.len());

    for (input_index, event) in events {
        match event.validate() {
            Ok(()) => valid.push((input_index, event)),
            Err(error) => rejected.push(reject(input_index, &event.label, error)),
        }
    }

    // Stable: ties keep input order.
    valid.sort_by_key(|(_, event)| event.start);

    let mut ordered = Vec::with_capacity(valid.len());
    let mut fragments = Vec::with_capacity(valid.len());

    for (input_index, event) in valid {
        let pieces = match split_at_midnight(&event, max_span_days) {
            Ok(pieces) => pieces,
            Err(error) => {
                rejected.push(reject(input_index, &event.label, error));
                continue;
            }
        };

        let event_index = ordered.len();
        fragments.extend(
            pieces
                .into_iter()
                .map(|(start, end)| fragment(event_index, &event, start, end)),
        );
        ordered.push(IndexedEvent { input_index, event });
    }

    fragments.sort_by_key(|f| f.start);
    rejected.sort_by_key(|r| r.input_index);

    Normalized {
        events: ordered,
        fragments,
        rejected,
    }
}

pub(crate) fn reject(input_index: usize, label: &str, error: LayoutError) -> RejectedEvent {
    warn!("Skipping event #{} ({:?}): {}", input_index, label, error);
    RejectedEvent {
        input_index,
        label: label.to_string(),
        error,
    }
}

/// Cut an event's interval at every local midnight it crosses.
///
/// An event ending exactly at midnight does not produce an empty trailing
/// piece. At most `max_span_days` pieces are produced.
///
/// # Errors
/// Returns `LayoutError::SpanTooLong` when more pieces would be needed and
/// `LayoutError::OutOfRange` if a midnight falls outside the calendar range.
pub fn split_at_midnight(
    event: &Event,
    max_span_days: u32,
) -> Result<Vec<(NaiveDateTime, NaiveDateTime)>> {
    let mut pieces = Vec::new();
    let mut cursor = event.start;

    loop {
        let midnight = next_midnight(cursor)?;
        if event.end <= midnight {
            pieces.push((cursor, event.end));
            return Ok(pieces);
        }
        if pieces.len() + 1 >= max_span_days as usize {
            return Err(LayoutError::SpanTooLong {
                start: event.start,
                max_days: max_span_days,
            });
        }
        pieces.push((cursor, midnight));
        cursor = midnight;
    }
}

fn next_midnight(at: NaiveDateTime) -> Result<NaiveDateTime> {
    at.date()
        .succ_opt()
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| LayoutError::OutOfRange(format!("no day follows {}", at.date())))
}

fn fragment(
    event_index: usize,
    event: &Event,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> EventFragment {
    let day = DayKey::new(start.date());
    EventFragment {
        event_index,
        start,
        end,
        label: event.label.clone(),
        day,
        weekday: day.weekday(),
        is_head: start == event.start,
        is_tail: end == event.end,
    }
}
