//! Recurrence evaluation -- decides whether a series has an occurrence on a
//! given day and expands events into concrete occurrences over a date range.
//!
//! Evaluation is pure: the stored [`RecurrenceRule`](crate::event::RecurrenceRule)
//! is only ever read. In particular an empty weekly day set is read as the
//! anchor's weekday without being filled in.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};

use crate::calendar_math::{days_between, days_in_range, months_between};
use crate::event::{Event, Occurrence, RecurrencePattern, WeekDay};

/// Whether `event` has an occurrence on `date`.
///
/// For a non-recurring event this is plain date equality. For a series:
///
/// 1. nothing before the anchor `event.date`,
/// 2. nothing after `recurrence.end_date` (the end date itself still counts),
/// 3. otherwise the pattern decides, measured in whole days, weeks or
///    calendar months from the anchor.
pub fn occurs_on(event: &Event, date: NaiveDate) -> bool {
    let anchor = event.date;
    let rule = &event.recurrence;

    if rule.pattern == RecurrencePattern::None {
        return date == anchor;
    }

    if date < anchor {
        return false;
    }

    if let Some(end_date) = rule.end_date {
        if date > end_date {
            return false;
        }
    }

    let days = days_between(anchor, date);

    match &rule.pattern {
        RecurrencePattern::None => false,
        RecurrencePattern::Daily { interval } => days % effective_interval(*interval) == 0,
        RecurrencePattern::Weekly {
            interval,
            week_days,
        } => {
            let weeks = days.div_euclid(7);
            falls_on_week_day(week_days, anchor, date) && weeks % effective_interval(*interval) == 0
        }
        RecurrencePattern::Monthly { interval } => {
            date.day() == anchor.day()
                && months_between(anchor, date) % effective_interval(*interval) == 0
        }
        RecurrencePattern::Custom { interval_days } => {
            if *interval_days == 0 {
                return false;
            }
            days % i64::from(*interval_days) == 0
        }
    }
}

/// All occurrences of `event` in the closed range `[range_start, range_end]`,
/// in date order.
///
/// Produces exactly the days for which [`occurs_on`] holds, restricted to the
/// part of the range that can contain occurrences (from the anchor up to the
/// end date).
pub fn expand(event: &Event, range_start: NaiveDate, range_end: NaiveDate) -> Vec<Occurrence> {
    if !event.is_recurring() {
        if (range_start..=range_end).contains(&event.date) {
            return vec![Occurrence::single(event)];
        }
        return Vec::new();
    }

    let first = range_start.max(event.date);
    let last = match event.recurrence.end_date {
        Some(end_date) => range_end.min(end_date),
        None => range_end,
    };

    days_in_range(first, last)
        .filter(|day| occurs_on(event, *day))
        .map(|day| Occurrence::instance(event, day))
        .collect()
}

/// The dates of [`expand`], without cloning the event for each instance.
pub fn occurrence_dates(event: &Event, range_start: NaiveDate, range_end: NaiveDate) -> Vec<NaiveDate> {
    let first = range_start.max(event.date);
    let last = match event.recurrence.end_date {
        Some(end_date) if event.is_recurring() => range_end.min(end_date),
        _ => range_end,
    };
    days_in_range(first, last)
        .filter(|day| occurs_on(event, *day))
        .collect()
}

/// The first day `event` actually occurs on, or `None` when it never does.
///
/// Every pattern lands on its anchor except a weekly series whose days leave
/// out the anchor's weekday, and that one lands within the anchor's week, so
/// only the seven days from the anchor are scanned.
pub fn first_occurrence(event: &Event) -> Option<NaiveDate> {
    let week_end = event
        .date
        .checked_add_days(Days::new(6))
        .unwrap_or(event.date);
    occurrence_dates(event, event.date, week_end).into_iter().next()
}

fn effective_interval(interval: u32) -> i64 {
    i64::from(interval.max(1))
}

/// An empty set stands for the anchor's own weekday.
fn falls_on_week_day(week_days: &BTreeSet<WeekDay>, anchor: NaiveDate, date: NaiveDate) -> bool {
    let weekday = WeekDay::of(date);
    if week_days.is_empty() {
        weekday == WeekDay::of(anchor)
    } else {
        week_days.contains(&weekday)
    }
}
