//! # slot-grid
//!
//! Deterministic calendar layout for day and week views.
//!
//! Given shifts and care tasks as `{start, end, label}` records, slot-grid
//! splits them at local midnight, indexes them into 30-minute slots, assigns
//! overlapping events to separate columns, and produces a `day -> slot -> cells`
//! grid ready for rendering. The computation is pure: the same input always
//! yields the same layout.
//!
//! ## Quick start
//!
//! ```rust
//! use slot_grid::{layout_records, EventRecord, LayoutOptions};
//!
//! let records = vec![
//!     EventRecord { start: "2026-03-02T09:00".into(), end: "2026-03-02T10:00".into(), label: "A".into() },
//!     EventRecord { start: "2026-03-02T09:30".into(), end: "2026-03-02T10:30".into(), label: "B".into() },
//! ];
//! let layout = layout_records(&records, &LayoutOptions::default());
//! let day = layout.fragments[0].day;
//! assert_eq!(layout.max_in_day(&day), 2);
//! ```
//!
//! ## Modules
//!
//! - [`event`] — Input events, per-day fragments, timestamp parsing
//! - [`normalizer`] — Sort and split events at midnight
//! - [`slots`] — 30-minute slots and fragment-to-slot indexing
//! - [`overlap`] — Per-day column assignment and concurrency tracking
//! - [`grid`] — Render grid construction
//! - [`week`] — Monday-anchored week windows
//! - [`layout`] — The end-to-end pipeline
//! - [`error`] — Error types

pub mod error;
pub mod event;
pub mod grid;
pub mod layout;
pub mod normalizer;
pub mod overlap;
pub mod slots;
pub mod week;

pub use error::LayoutError;
pub use event::{parse_timestamp, DayKey, Event, EventFragment, EventRecord};
pub use grid::{Cell, EventCell, RenderGrid};
pub use layout::{layout_events, layout_records, Layout, LayoutOptions};
pub use normalizer::{normalize, RejectedEvent};
pub use overlap::DayOverlap;
pub use slots::{slots_for, Slot, SlotOccupancy};
pub use week::WeekWindow;
