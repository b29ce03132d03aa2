//! The full layout pipeline: normalize, index slots, track overlap, build the grid.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::event::{DayKey, Event, EventFragment, EventRecord};
use crate::grid::{build_grid, RenderGrid};
use crate::normalizer::{normalize_indexed, reject, IndexedEvent, RejectedEvent};
use crate::overlap::{track, DayOverlap};
use crate::slots::{slots_for, SlotOccupancy};

/// Default cap on the number of calendar days one event may span.
pub const DEFAULT_MAX_SPAN_DAYS: u32 = 366;

/// Tunables for [`layout_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Events needing more day fragments than this are rejected as malformed.
    pub max_span_days: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_span_days: DEFAULT_MAX_SPAN_DAYS,
        }
    }
}

/// Result of laying out a batch of events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Laid-out events in start order; `event_index` values index this vector.
    pub events: Vec<IndexedEvent>,
    /// Per-day fragments, sorted by start.
    pub fragments: Vec<EventFragment>,
    /// Column assignment and concurrency per day.
    pub days: BTreeMap<DayKey, DayOverlap>,
    pub grid: RenderGrid,
    /// Events excluded from the layout, in input order.
    pub rejected: Vec<RejectedEvent>,
}

impl Layout {
    pub fn day(&self, day: &DayKey) -> Option<&DayOverlap> {
        self.days.get(day)
    }

    pub fn column_of(&self, day: &DayKey, event_index: usize) -> Option<usize> {
        self.days.get(day)?.column_of(event_index)
    }

    pub fn max_concurrency_of(&self, day: &DayKey, event_index: usize) -> Option<usize> {
        self.days.get(day)?.concurrency_of(event_index)
    }

    /// Largest concurrency on `day`; 0 for days without events.
    pub fn max_in_day(&self, day: &DayKey) -> usize {
        self.days.get(day).map_or(0, |d| d.max_in_day)
    }

    /// Fragments split from one event, in time order.
    pub fn fragments_of(&self, event_index: usize) -> impl Iterator<Item = &EventFragment> {
        self.fragments
            .iter()
            .filter(move |f| f.event_index == event_index)
    }

    /// Whether every input event made it into the layout.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Lay out events on the slot grid.
///
/// Invalid events are skipped and reported in [`Layout::rejected`]; the rest
/// are laid out. The result depends only on `events` and `options`.
pub fn layout_events(events: &[Event], options: &LayoutOptions) -> Layout {
    run(
        events.iter().cloned().enumerate().collect(),
        Vec::new(),
        options,
    )
}

/// Parse raw records and lay out the ones that parse.
///
/// Records with malformed timestamps are reported in [`Layout::rejected`]
/// alongside invalid intervals.
pub fn layout_records(records: &[EventRecord], options: &LayoutOptions) -> Layout {
    let mut events = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for (input_index, record) in records.iter().enumerate() {
        match record.parse() {
            Ok(event) => events.push((input_index, event)),
            Err(error) => rejected.push(reject(input_index, &record.label, error)),
        }
    }
    run(events, rejected, options)
}

fn run(
    events: Vec<(usize, Event)>,
    mut rejected: Vec<RejectedEvent>,
    options: &LayoutOptions,
) -> Layout {
    let normalized = normalize_indexed(events, options.max_span_days);
    let slots: Vec<Vec<SlotOccupancy>> = normalized.fragments.iter().map(slots_for).collect();
    let days = track(&normalized.fragments, &slots);
    let grid = build_grid(&normalized.fragments, &slots, &days);

    rejected.extend(normalized.rejected);
    rejected.sort_by_key(|r| r.input_index);

    debug!(
        "Laid out {} events as {} fragments over {} days ({} rejected)",
        normalized.events.len(),
        normalized.fragments.len(),
        days.len(),
        rejected.len()
    );

    Layout {
        events: normalized.events,
        fragments: normalized.fragments,
        days,
        grid,
        rejected,
    }
}
