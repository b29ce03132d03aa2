//! Render grid construction.
//!
//! For each day and slot the grid holds an ordered sequence of cells, one per
//! column. The sequence length is the `max_concurrency` of the slot's anchor
//! (its first occupant), not the day-wide maximum, so neighbouring slots of the
//! same day can have different widths. `DayOverlap::max_in_day` is available to
//! renderers that want uniform column widths.

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use crate::event::{DayKey, EventFragment};
use crate::overlap::DayOverlap;
use crate::slots::{Slot, SlotOccupancy};
use crate::week::WeekWindow;

/// A fragment as it appears in one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCell {
    pub event_index: usize,
    pub column: usize,
    /// Present only in the fragment's first slot.
    pub label: Option<String>,
    /// Round the top corners: the event itself starts exactly at this slot's start.
    pub is_head: bool,
    /// Round the bottom corners: the event itself ends exactly at this slot's end.
    pub is_tail: bool,
    /// The event's maximum concurrency on this day, for column-width calculation.
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Event(EventCell),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_event(&self) -> Option<&EventCell> {
        match self {
            Cell::Event(cell) => Some(cell),
            Cell::Empty => None,
        }
    }
}

/// Cells of every slot of one day.
pub type DayGrid = BTreeMap<Slot, Vec<Cell>>;

/// `day -> slot -> cells`, serialized as nested maps keyed by `"d/m/yyyy"` and `"H:MM"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderGrid {
    days: BTreeMap<DayKey, DayGrid>,
}

impl RenderGrid {
    pub fn day(&self, day: &DayKey) -> Option<&DayGrid> {
        self.days.get(day)
    }

    pub fn days(&self) -> impl Iterator<Item = (&DayKey, &DayGrid)> {
        self.days.iter()
    }

    /// Cells of `slot` on `day`; empty when nothing occupies it.
    pub fn cells(&self, day: &DayKey, slot: Slot) -> &[Cell] {
        self.days
            .get(day)
            .and_then(|grid| grid.get(&slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Restrict the grid to the seven days of `window`.
    ///
    /// Days of the window without any event still appear, with every slot empty.
    pub fn week(&self, window: &WeekWindow) -> RenderGrid {
        let days = window
            .day_keys()
            .into_iter()
            .map(|key| {
                let grid = self.days.get(&key).cloned().unwrap_or_else(empty_day);
                (key, grid)
            })
            .collect();
        RenderGrid { days }
    }
}

fn empty_day() -> DayGrid {
    Slot::all().map(|slot| (slot, Vec::new())).collect()
}

/// Build the render grid from fragments (paired with their slots) and per-day overlap.
pub fn build_grid(
    fragments: &[EventFragment],
    slots: &[Vec<SlotOccupancy>],
    days: &BTreeMap<DayKey, DayOverlap>,
) -> RenderGrid {
    let mut grid: BTreeMap<DayKey, DayGrid> = days
        .iter()
        .map(|(key, overlap)| (*key, sized_day(overlap)))
        .collect();

    for (fragment, occupancy) in fragments.iter().zip(slots) {
        let (Some(overlap), Some(day_grid)) = (days.get(&fragment.day), grid.get_mut(&fragment.day))
        else {
            continue;
        };
        let (Some(column), Some(max_concurrency)) = (
            overlap.column_of(fragment.event_index),
            overlap.concurrency_of(fragment.event_index),
        ) else {
            continue;
        };

        for occ in occupancy {
            let cells = day_grid.entry(occ.slot).or_default();
            if column >= cells.len() {
                // First-fit columns can exceed the anchor's width.
                cells.resize(column + 1, Cell::Empty);
            }
            if let Cell::Event(existing) = &cells[column] {
                warn!(
                    "Column {} of slot {} on {} already holds event #{}; replacing with #{}",
                    column, occ.slot, fragment.day, existing.event_index, fragment.event_index
                );
            }
            cells[column] = Cell::Event(EventCell {
                event_index: fragment.event_index,
                column,
                label: occ.is_first.then(|| fragment.label.clone()),
                is_head: fragment.is_head && occ.is_head,
                is_tail: fragment.is_tail && occ.is_tail,
                max_concurrency,
            });
        }
    }

    RenderGrid { days: grid }
}

/// Every slot of the day, pre-filled with placeholders sized by the slot's anchor.
fn sized_day(overlap: &DayOverlap) -> DayGrid {
    Slot::all()
        .map(|slot| {
            let width = overlap
                .anchor(slot)
                .and_then(|anchor| overlap.concurrency_of(anchor))
                .unwrap_or(0);
            (slot, vec![Cell::Empty; width])
        })
        .collect()
}
