//! Per-day overlap tracking and column assignment.
//!
//! Fragments are consumed in arrival order (fragment order, then slot order
//! within each fragment). Each slot keeps the ordered list of events seen in
//! it. The first time an event is seen on a day it receives a column:
//!
//! - `0` when the slot it lands in was empty;
//! - otherwise the column of the slot's immediately preceding occupant plus one.
//!
//! This is a first-fit-by-arrival policy, not a minimum interval coloring, so
//! some overlap patterns use more columns than strictly necessary.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::event::{DayKey, EventFragment};
use crate::slots::{Slot, SlotOccupancy};

/// Overlap state of one calendar day. Event state is keyed by `event_index`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayOverlap {
    /// Occupying events per slot, in arrival order. The first entry is the slot's anchor.
    pub occupants: BTreeMap<Slot, Vec<usize>>,
    /// Column assigned to each event active on this day.
    pub columns: BTreeMap<usize, usize>,
    /// Largest slot population each event has shared on this day.
    pub max_concurrency: BTreeMap<usize, usize>,
    /// Largest `max_concurrency` among the day's events.
    pub max_in_day: usize,
}

impl DayOverlap {
    pub fn column_of(&self, event_index: usize) -> Option<usize> {
        self.columns.get(&event_index).copied()
    }

    pub fn concurrency_of(&self, event_index: usize) -> Option<usize> {
        self.max_concurrency.get(&event_index).copied()
    }

    /// Events occupying `slot`, in arrival order.
    pub fn occupants(&self, slot: Slot) -> &[usize] {
        self.occupants.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first event to arrive in `slot`, which determines the slot's grid width.
    pub fn anchor(&self, slot: Slot) -> Option<usize> {
        self.occupants(slot).first().copied()
    }

    /// Number of distinct columns used on this day.
    pub fn column_count(&self) -> usize {
        self.columns.values().max().map_or(0, |c| c + 1)
    }

    fn place(&mut self, slot: Slot, event_index: usize) {
        let list = self.occupants.entry(slot).or_default();
        let predecessor = list.last().copied();
        list.push(event_index);

        if !self.columns.contains_key(&event_index) {
            let column = predecessor
                .and_then(|prev| self.columns.get(&prev))
                .map_or(0, |c| c + 1);
            self.columns.insert(event_index, column);
        }

        let population = list.len();
        for &occupant in list.iter() {
            let seen = self.max_concurrency.entry(occupant).or_insert(0);
            *seen = (*seen).max(population);
        }
        self.max_in_day = self.max_in_day.max(population);
    }
}

/// Accumulates [`DayOverlap`] state as fragments arrive.
#[derive(Debug, Clone, Default)]
pub struct OverlapTracker {
    days: BTreeMap<DayKey, DayOverlap>,
}

impl OverlapTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one fragment's slots. Fragments must be fed in arrival order.
    pub fn record(&mut self, fragment: &EventFragment, slots: &[SlotOccupancy]) {
        let day = self.days.entry(fragment.day).or_default();
        for occupancy in slots {
            day.place(occupancy.slot, fragment.event_index);
        }
    }

    pub fn day(&self, day: &DayKey) -> Option<&DayOverlap> {
        self.days.get(day)
    }

    pub fn finish(self) -> BTreeMap<DayKey, DayOverlap> {
        self.days
    }
}

/// Track every fragment, paired with its slots, in the given order.
pub fn track(
    fragments: &[EventFragment],
    slots: &[Vec<SlotOccupancy>],
) -> BTreeMap<DayKey, DayOverlap> {
    let mut tracker = OverlapTracker::new();
    for (fragment, occupancy) in fragments.iter().zip(slots) {
        tracker.record(fragment, occupancy);
    }
    tracker.finish()
}
