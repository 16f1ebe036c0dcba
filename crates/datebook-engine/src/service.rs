//! Store-backed entry points for a host application.
//!
//! [`EventService`] loads the current collection from its injected
//! [`EventStore`], runs the pure operation from [`crate::mutation`] or
//! [`crate::grid`], and saves the result when a mutation was applied.

use chrono::NaiveDate;

use crate::error::Result;
use crate::event::{Event, Occurrence};
use crate::form::EventForm;
use crate::grid::{build_month, CalendarMonth};
use crate::mutation::{self, MutationOutcome};
use crate::projector::occurrences_on_day;
use crate::search::filter_events;
use crate::store::EventStore;

pub struct EventService<S> {
    store: S,
}

impl<S: EventStore> EventService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn events(&self) -> Vec<Event> {
        self.store.load()
    }

    /// The month grid around `anchor`, optionally restricted to events
    /// matching `search`.
    pub fn month(&self, anchor: NaiveDate, search: Option<&str>, today: NaiveDate) -> CalendarMonth {
        let events = self.visible_events(search);
        build_month(anchor, &events, today)
    }

    pub fn day(&self, date: NaiveDate, search: Option<&str>) -> Vec<Occurrence> {
        let events = self.visible_events(search);
        occurrences_on_day(date, &events)
    }

    pub fn create(&self, form: &EventForm) -> Result<MutationOutcome> {
        let draft = form.validate()?;
        let outcome = mutation::create(&self.store.load(), draft);
        self.persist(outcome)
    }

    pub fn update(&self, id: &str, form: &EventForm) -> Result<MutationOutcome> {
        let draft = form.validate()?;
        let outcome = mutation::update(&self.store.load(), id, draft);
        self.persist(outcome)
    }

    pub fn delete(&self, id: &str, delete_all_in_series: bool) -> Result<Vec<Event>> {
        let updated = mutation::delete(&self.store.load(), id, delete_all_in_series);
        self.store.save(&updated)?;
        Ok(updated)
    }

    pub fn move_event(&self, id: &str, new_date: NaiveDate) -> Result<MutationOutcome> {
        let outcome = mutation::move_event(&self.store.load(), id, new_date);
        self.persist(outcome)
    }

    pub fn move_occurrence(&self, occurrence: &Occurrence, new_date: NaiveDate) -> Result<MutationOutcome> {
        let outcome = mutation::move_occurrence(&self.store.load(), occurrence, new_date);
        self.persist(outcome)
    }

    pub fn force_apply(&self, proposed: Event) -> Result<Vec<Event>> {
        let updated = mutation::force_apply(&self.store.load(), proposed);
        self.store.save(&updated)?;
        Ok(updated)
    }

    fn visible_events(&self, search: Option<&str>) -> Vec<Event> {
        let events = self.store.load();
        match search {
            Some(term) => filter_events(&events, term),
            None => events,
        }
    }

    fn persist(&self, outcome: MutationOutcome) -> Result<MutationOutcome> {
        if let MutationOutcome::Applied(events) = &outcome {
            self.store.save(events)?;
        }
        Ok(outcome)
    }
}
