//! Month view construction.
//!
//! A month is laid out on a Sunday-first grid that starts with the week holding
//! the 1st and ends with the week holding the last day, so it always covers a
//! whole number of weeks and may include days of the adjacent months.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::calendar_math::{
    days_in_range, end_of_month, end_of_week, same_month, start_of_month, start_of_week,
};
use crate::event::{Event, Occurrence};
use crate::projector::occurrences_on_day;

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_in_target_month: bool,
    pub is_today: bool,
    pub occurrences: Vec<Occurrence>,
}

/// A week-aligned month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    /// 1-based month number.
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// The grid split into rows of seven days, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|day| day.date == date)
    }
}

/// Build the grid for the month containing `anchor`.
///
/// `today` is only used to flag the matching cell; it is a side input so that
/// repeated calls with the same arguments produce identical grids.
pub fn build_month(anchor: NaiveDate, events: &[Event], today: NaiveDate) -> CalendarMonth {
    let month_start = start_of_month(anchor);
    let grid_start = start_of_week(month_start);
    let grid_end = end_of_week(end_of_month(anchor));

    let days = days_in_range(grid_start, grid_end)
        .map(|date| CalendarDay {
            date,
            is_in_target_month: same_month(date, month_start),
            is_today: date == today,
            occurrences: occurrences_on_day(date, events),
        })
        .collect();

    CalendarMonth {
        year: anchor.year(),
        month: anchor.month(),
        days,
    }
}

/// [`build_month`] with `today` read from the local clock at call time.
pub fn build_month_now(anchor: NaiveDate, events: &[Event]) -> CalendarMonth {
    build_month(anchor, events, Local::now().date_naive())
}
