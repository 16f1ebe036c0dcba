//! Create, update, delete and move operations over an event collection.
//!
//! Every operation takes the current collection and returns a new one; nothing
//! is mutated in place. Operations that change a date or time check for a
//! scheduling conflict first and report it as [`MutationOutcome::Conflict`]
//! instead of applying the change. [`force_apply`] is the "schedule anyway"
//! path that skips the check.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::conflict::find_conflict;
use crate::event::{Event, Occurrence};
use crate::form::EventDraft;
use crate::projector::occurrences_on_day;
use crate::recurrence::first_occurrence;

/// A conflict found while applying a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    /// The existing occurrence the proposed event overlaps.
    pub conflicting: Occurrence,
    /// The event as it would have been stored. Pass it to [`force_apply`] to
    /// store it anyway.
    pub proposed: Event,
}

/// Result of a conflict-checked mutation. The caller must branch on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The mutation was applied; this is the updated collection.
    Applied(Vec<Event>),
    /// Nothing was changed.
    Conflict(ConflictReport),
}

impl MutationOutcome {
    pub fn is_conflict(&self) -> bool {
        matches!(self, MutationOutcome::Conflict(_))
    }

    /// The updated collection, if the mutation was applied.
    pub fn applied(self) -> Option<Vec<Event>> {
        match self {
            MutationOutcome::Applied(events) => Some(events),
            MutationOutcome::Conflict(_) => None,
        }
    }
}

/// The first existing occurrence that overlaps `candidate` on the first day
/// it occurs.
///
/// For a series that is not always the anchor date: a weekly series anchored
/// on a day outside its weekdays is checked on its first matching weekday. A
/// series that never occurs cannot conflict. Occurrences of the candidate's
/// own id are ignored, so an event never conflicts with its previous version.
pub fn check_conflict(candidate: &Event, events: &[Event]) -> Option<Occurrence> {
    let day = first_occurrence(candidate)?;
    let probe = if candidate.is_recurring() {
        Occurrence::instance(candidate, day)
    } else {
        Occurrence::single(candidate)
    };
    let pool = occurrences_on_day(day, events);

    find_conflict(&probe, &pool).cloned()
}

/// Add a new event built from `draft` under a freshly generated id.
pub fn create(events: &[Event], draft: EventDraft) -> MutationOutcome {
    let proposed = draft.into_event(Event::generate_id());
    debug!(id = %proposed.id, date = %proposed.date, "creating event");

    if let Some(conflicting) = check_conflict(&proposed, events) {
        return conflict(conflicting, proposed);
    }

    let mut updated = events.to_vec();
    updated.push(proposed);
    MutationOutcome::Applied(updated)
}

/// Rebuild the event `id` from `draft`, including its recurrence rule.
///
/// An unknown id leaves the collection unchanged.
pub fn update(events: &[Event], id: &str, draft: EventDraft) -> MutationOutcome {
    if !events.iter().any(|event| event.id == id) {
        warn!(%id, "update of unknown event ignored");
        return MutationOutcome::Applied(events.to_vec());
    }

    let proposed = draft.into_event(id.to_string());
    debug!(%id, date = %proposed.date, "updating event");

    if let Some(conflicting) = check_conflict(&proposed, events) {
        return conflict(conflicting, proposed);
    }

    MutationOutcome::Applied(replace(events, proposed))
}

/// Remove the event `id`.
///
/// Both values of `delete_all_in_series` remove the same thing: the one
/// stored event with `id`. Instances are derived rather than stored, so for a
/// series that already removes every instance, and there is nothing else to
/// delete. Removing a single instance of a series is not supported.
pub fn delete(events: &[Event], id: &str, delete_all_in_series: bool) -> Vec<Event> {
    debug!(%id, delete_all_in_series, "deleting event");
    events
        .iter()
        .filter(|event| event.id != id)
        .cloned()
        .collect()
}

/// Move the event `id` to `new_date`.
///
/// For a recurring event this moves the anchor and so shifts the whole
/// series. An unknown id leaves the collection unchanged.
pub fn move_event(events: &[Event], id: &str, new_date: NaiveDate) -> MutationOutcome {
    let Some(existing) = events.iter().find(|event| event.id == id) else {
        warn!(%id, "move of unknown event ignored");
        return MutationOutcome::Applied(events.to_vec());
    };

    let mut proposed = existing.clone();
    proposed.date = new_date;
    debug!(%id, from = %existing.date, to = %new_date, "moving event");

    if let Some(conflicting) = check_conflict(&proposed, events) {
        return conflict(conflicting, proposed);
    }

    MutationOutcome::Applied(replace(events, proposed))
}

/// Move the event behind `occurrence`. Instances resolve to their series, so
/// dragging one instance moves the series anchor rather than creating a
/// detached copy.
pub fn move_occurrence(events: &[Event], occurrence: &Occurrence, new_date: NaiveDate) -> MutationOutcome {
    move_event(events, occurrence.series_id(), new_date)
}

/// Store `proposed` without a conflict check, replacing the event with the
/// same id in place or appending it.
pub fn force_apply(events: &[Event], proposed: Event) -> Vec<Event> {
    debug!(id = %proposed.id, "applying event without conflict check");
    if events.iter().any(|event| event.id == proposed.id) {
        replace(events, proposed)
    } else {
        let mut updated = events.to_vec();
        updated.push(proposed);
        updated
    }
}

fn replace(events: &[Event], replacement: Event) -> Vec<Event> {
    events
        .iter()
        .map(|event| {
            if event.id == replacement.id {
                replacement.clone()
            } else {
                event.clone()
            }
        })
        .collect()
}

fn conflict(conflicting: Occurrence, proposed: Event) -> MutationOutcome {
    debug!(
        proposed = %proposed.id,
        conflicting = %conflicting.series_id(),
        date = %conflicting.occurrence_date,
        "scheduling conflict"
    );
    MutationOutcome::Conflict(ConflictReport {
        conflicting,
        proposed,
    })
}
