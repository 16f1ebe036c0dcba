//! Free-text search over base events.

use crate::event::Event;

/// Events whose title or description contains `term`, ignoring case.
///
/// Applied to stored events, before any expansion into occurrences. A blank
/// term matches everything.
pub fn filter_events(events: &[Event], term: &str) -> Vec<Event> {
    if term.trim().is_empty() {
        return events.to_vec();
    }

    let term = term.to_lowercase();
    events
        .iter()
        .filter(|event| {
            event.title.to_lowercase().contains(&term)
                || event.description.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}
