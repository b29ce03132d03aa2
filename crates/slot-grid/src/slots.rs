//! Fixed-width time slots and fragment-to-slot indexing.
//!
//! A day is divided into 48 half-hour slots labelled `"H:00"` / `"H:30"`.
//! Occupancy uses half-open intervals: a fragment ending exactly on a slot
//! boundary does not occupy the slot that starts there.

use std::fmt;

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::event::EventFragment;

/// Width of one slot in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// Number of slots in a calendar day.
pub const SLOTS_PER_DAY: usize = (24 * 60 / SLOT_MINUTES) as usize;

/// A half-hour bucket of a day, identified by its index (0 = 0:00, 47 = 23:30).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u8);

impl Slot {
    /// The slot with the given index, if it lies within a day.
    pub fn new(index: usize) -> Option<Self> {
        (index < SLOTS_PER_DAY).then_some(Self(index as u8))
    }

    /// The slot containing `time`.
    pub fn containing(time: NaiveTime) -> Self {
        let minutes = time.hour() * 60 + time.minute();
        Self((minutes / SLOT_MINUTES) as u8)
    }

    /// Parse a slot label such as `"9:30"` or `"13:00"`.
    pub fn from_label(label: &str) -> Option<Self> {
        let (hour, minute) = label.split_once(':')?;
        let hour: u32 = hour.parse().ok()?;
        let minute: u32 = minute.parse().ok()?;
        if hour >= 24 || minute % SLOT_MINUTES != 0 || minute >= 60 {
            return None;
        }
        Self::new(((hour * 60 + minute) / SLOT_MINUTES) as usize)
    }

    /// All slots of a day, in time order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..SLOTS_PER_DAY as u8).map(Slot)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn start_minute(self) -> u32 {
        u32::from(self.0) * SLOT_MINUTES
    }

    pub fn start_time(self) -> NaiveTime {
        let minute = self.start_minute();
        NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minute = self.start_minute();
        write!(f, "{}:{:02}", minute / 60, minute % 60)
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One slot occupied by a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotOccupancy {
    pub slot: Slot,
    /// The fragment starts exactly at the slot start.
    pub is_head: bool,
    /// The fragment ends exactly at the slot end.
    pub is_tail: bool,
    /// First slot the fragment occupies (the one containing its start).
    pub is_first: bool,
    /// Last slot the fragment occupies (the one containing its last instant).
    pub is_last: bool,
}

/// Enumerate the slots a fragment occupies within its day, in time order.
///
/// Slot `[t, t+30m)` is occupied iff `fragment.start < t+30m && fragment.end > t`,
/// compared at full timestamp precision.
pub fn slots_for(fragment: &EventFragment) -> Vec<SlotOccupancy> {
    let midnight = fragment.day.date().and_time(NaiveTime::MIN);
    let width = Duration::minutes(i64::from(SLOT_MINUTES));

    let mut occupied: Vec<SlotOccupancy> = Slot::all()
        .filter_map(|slot| {
            let slot_start = midnight
                .checked_add_signed(Duration::minutes(i64::from(slot.start_minute())))?;
            let slot_end = slot_start.checked_add_signed(width)?;
            (fragment.start < slot_end && fragment.end > slot_start).then_some(SlotOccupancy {
                slot,
                is_head: fragment.start == slot_start,
                is_tail: fragment.end == slot_end,
                is_first: false,
                is_last: false,
            })
        })
        .collect();

    if let Some(first) = occupied.first_mut() {
        first.is_first = true;
    }
    if let Some(last) = occupied.last_mut() {
        last.is_last = true;
    }
    occupied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_unpadded_hours() {
        assert_eq!(Slot::new(0).unwrap().label(), "0:00");
        assert_eq!(Slot::new(19).unwrap().label(), "9:30");
        assert_eq!(Slot::new(47).unwrap().label(), "23:30");
        assert_eq!(Slot::new(48), None);
    }

    #[test]
    fn label_roundtrips_through_parse() {
        for slot in Slot::all() {
            assert_eq!(Slot::from_label(&slot.label()), Some(slot));
        }
        assert_eq!(Slot::from_label("9:15"), None);
        assert_eq!(Slot::from_label("24:00"), None);
        assert_eq!(Slot::from_label("nine"), None);
    }

    #[test]
    fn containing_rounds_down() {
        let t = NaiveTime::from_hms_opt(9, 59, 59).unwrap();
        assert_eq!(Slot::containing(t).label(), "9:30");
        assert_eq!(Slot::containing(NaiveTime::MIN).index(), 0);
    }
}
