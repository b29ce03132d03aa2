//! WASM bindings for slot-grid.
//!
//! Exposes the calendar layout pipeline and week navigation to the web front
//! end via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-grid-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-grid-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_grid_wasm.wasm
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use slot_grid::{
    layout_records, EventRecord, Layout, LayoutOptions, RejectedEvent, RenderGrid, WeekWindow,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LayoutDto<'a> {
    grid: &'a RenderGrid,
    /// `"d/m/yyyy" -> max concurrency`, for renderers that size columns per day.
    max_in_day: BTreeMap<String, usize>,
    rejected: &'a [RejectedEvent],
}

impl<'a> LayoutDto<'a> {
    fn new(layout: &'a Layout, grid: &'a RenderGrid) -> Self {
        Self {
            grid,
            max_in_day: layout
                .days
                .iter()
                .map(|(day, overlap)| (day.to_string(), overlap.max_in_day))
                .collect(),
            rejected: &layout.rejected,
        }
    }
}

#[derive(Serialize)]
struct WeekDto {
    title: String,
    month: String,
    year: String,
    reference: String,
    /// ISO dates, Monday first.
    dates: Vec<String>,
    /// Grid keys (`"d/m/yyyy"`), Monday first.
    days: Vec<String>,
}

impl From<&WeekWindow> for WeekDto {
    fn from(week: &WeekWindow) -> Self {
        Self {
            title: week.title(),
            month: week.month_label(),
            year: week.year_label(),
            reference: week.reference().to_string(),
            dates: week.dates().iter().map(|d| d.to_string()).collect(),
            days: week.day_keys().iter().map(|k| k.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out, errors as plain strings
// ---------------------------------------------------------------------------

fn parse_records(json: &str) -> Result<Vec<EventRecord>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid events JSON: {}", e))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    s.parse::<NaiveDate>()
        .map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn options(max_span_days: Option<u32>) -> LayoutOptions {
    max_span_days
        .map(|max_span_days| LayoutOptions { max_span_days })
        .unwrap_or_default()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn layout_json(events_json: &str, max_span_days: Option<u32>) -> Result<String, String> {
    let records = parse_records(events_json)?;
    let layout = layout_records(&records, &options(max_span_days));
    to_json(&LayoutDto::new(&layout, &layout.grid))
}

fn layout_week_json(
    events_json: &str,
    date: &str,
    max_span_days: Option<u32>,
) -> Result<String, String> {
    let records = parse_records(events_json)?;
    let week = WeekWindow::containing(parse_date(date)?).map_err(|e| e.to_string())?;
    let layout = layout_records(&records, &options(max_span_days));
    let grid = layout.grid.week(&week);
    to_json(&LayoutDto::new(&layout, &grid))
}

fn week_window_json(date: &str, offset: i32) -> Result<String, String> {
    let week = WeekWindow::containing(parse_date(date)?)
        .and_then(|week| week.shifted(i64::from(offset)))
        .map_err(|e| e.to_string())?;
    to_json(&WeekDto::from(&week))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Lay out events on the slot grid.
///
/// `events_json` must be a JSON array of `{start, end, label}` objects with ISO
/// 8601 datetime strings. Returns `{grid, max_in_day, rejected}` as a JSON string;
/// invalid events are listed under `rejected` instead of failing the call.
#[wasm_bindgen(js_name = "layoutEvents")]
pub fn layout_events(events_json: &str, max_span_days: Option<u32>) -> Result<String, JsValue> {
    layout_json(events_json, max_span_days).map_err(|e| JsValue::from_str(&e))
}

/// Lay out events and keep only the week containing `date` (`YYYY-MM-DD`).
///
/// Days of the week without events still carry 48 empty slots.
#[wasm_bindgen(js_name = "layoutWeek")]
pub fn layout_week(
    events_json: &str,
    date: &str,
    max_span_days: Option<u32>,
) -> Result<String, JsValue> {
    layout_week_json(events_json, date, max_span_days).map_err(|e| JsValue::from_str(&e))
}

/// The Monday-anchored week containing `date`, moved by `offset` weeks.
///
/// Returns `{title, month, year, reference, dates, days}` as a JSON string.
#[wasm_bindgen(js_name = "weekWindow")]
pub fn week_window(date: &str, offset: i32) -> Result<String, JsValue> {
    week_window_json(date, offset).map_err(|e| JsValue::from_str(&e))
}
