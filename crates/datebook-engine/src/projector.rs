//! Project stored events onto a single calendar day.

use chrono::NaiveDate;

use crate::event::{Event, Occurrence};
use crate::recurrence::occurs_on;

/// The occurrences falling on `date`.
///
/// One-off events dated `date` come first, then instances of recurring series,
/// each group in collection order.
pub fn occurrences_on_day(date: NaiveDate, events: &[Event]) -> Vec<Occurrence> {
    let singles = events
        .iter()
        .filter(|event| !event.is_recurring() && event.date == date)
        .map(Occurrence::single);

    let instances = events
        .iter()
        .filter(|event| event.is_recurring() && occurs_on(event, date))
        .map(|event| Occurrence::instance(event, date));

    singles.chain(instances).collect()
}
