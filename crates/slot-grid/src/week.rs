//! Monday-anchored week windows for the grid's date axis.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::{LayoutError, Result};
use crate::event::DayKey;

/// The seven dates (Monday first) of the week containing a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    reference: NaiveDate,
    dates: [NaiveDate; 7],
}

impl WeekWindow {
    /// The week containing `reference`.
    ///
    /// # Errors
    /// Returns `LayoutError::OutOfRange` if the week extends past the
    /// representable calendar range.
    pub fn containing(reference: NaiveDate) -> Result<Self> {
        let offset = u64::from(reference.weekday().num_days_from_monday());
        let monday = reference
            .checked_sub_days(Days::new(offset))
            .ok_or_else(|| out_of_range(reference))?;

        let mut dates = [monday; 7];
        for (i, date) in dates.iter_mut().enumerate().skip(1) {
            *date = monday
                .checked_add_days(Days::new(i as u64))
                .ok_or_else(|| out_of_range(reference))?;
        }

        Ok(Self { reference, dates })
    }

    /// The date this window was computed from.
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn monday(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn sunday(&self) -> NaiveDate {
        self.dates[6]
    }

    pub fn dates(&self) -> [NaiveDate; 7] {
        self.dates
    }

    pub fn day_keys(&self) -> [DayKey; 7] {
        self.dates.map(DayKey::new)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.monday() <= date && date <= self.sunday()
    }

    /// Move the reference date forward by seven days.
    ///
    /// # Errors
    /// Returns `LayoutError::OutOfRange` past the end of the calendar range.
    pub fn next(&self) -> Result<Self> {
        self.shifted(1)
    }

    /// Move the reference date back by seven days.
    ///
    /// # Errors
    /// Returns `LayoutError::OutOfRange` past the start of the calendar range.
    pub fn previous(&self) -> Result<Self> {
        self.shifted(-1)
    }

    /// Move the reference date by `weeks` weeks (negative moves back).
    ///
    /// # Errors
    /// Returns `LayoutError::OutOfRange` if the target week is not representable.
    pub fn shifted(&self, weeks: i64) -> Result<Self> {
        let days = Days::new(weeks.unsigned_abs().saturating_mul(7));
        let moved = if weeks >= 0 {
            self.reference.checked_add_days(days)
        } else {
            self.reference.checked_sub_days(days)
        };
        let reference = moved.ok_or_else(|| out_of_range(self.reference))?;
        Self::containing(reference)
    }

    /// Full month name of the reference date (e.g. "March").
    pub fn month_label(&self) -> String {
        self.reference.format("%B").to_string()
    }

    pub fn year_label(&self) -> String {
        self.reference.year().to_string()
    }

    /// Heading for the week, e.g. "March 2026", "March - April 2026" or
    /// "December 2026 - January 2027".
    pub fn title(&self) -> String {
        let (start, end) = (self.monday(), self.sunday());
        if start.month() == end.month() && start.year() == end.year() {
            format!("{} {}", start.format("%B"), start.year())
        } else if start.year() == end.year() {
            format!("{} - {} {}", start.format("%B"), end.format("%B"), end.year())
        } else {
            format!(
                "{} {} - {} {}",
                start.format("%B"),
                start.year(),
                end.format("%B"),
                end.year()
            )
        }
    }
}

fn out_of_range(reference: NaiveDate) -> LayoutError {
    LayoutError::OutOfRange(format!("week around {} is not representable", reference))
}
