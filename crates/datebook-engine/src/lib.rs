//! # datebook-engine
//!
//! Recurrence expansion and scheduling-conflict engine for a personal calendar.
//!
//! Given stored events (one-off or repeating daily, weekly, monthly or every
//! N days) the engine works out which occurrences fall on each day, lays them
//! out on a Sunday-first month grid, and checks create/update/move requests
//! for same-day time overlaps. Everything operates on naive local dates and
//! times-of-day; there is no time zone handling.
//!
//! ## Modules
//!
//! - [`event`] — `Event`, `RecurrenceRule`, derived `Occurrence`
//! - [`calendar_math`] — month/week boundaries, day iteration, navigation
//! - [`recurrence`] — does a series occur on a date; range expansion
//! - [`conflict`] — same-day overlap detection
//! - [`projector`] — occurrences falling on one day
//! - [`grid`] — week-aligned month view
//! - [`form`] — form validation into an `EventDraft`
//! - [`mutation`] — conflict-checked create/update/delete/move
//! - [`search`] — title/description filtering
//! - [`store`] — storage collaborator trait, JSON file and memory stores
//! - [`service`] — store-backed entry points
//! - [`error`] — Error types

pub mod calendar_math;
pub mod conflict;
pub mod error;
pub mod event;
pub mod form;
pub mod grid;
pub mod mutation;
pub mod projector;
pub mod recurrence;
pub mod search;
pub mod service;
pub mod store;

pub use conflict::{find_conflict, overlaps};
pub use error::{CalendarError, StoreError, ValidationError};
pub use event::{Event, Occurrence, RecurrencePattern, RecurrenceRule, WeekDay};
pub use form::{EventDraft, EventForm};
pub use grid::{build_month, build_month_now, CalendarDay, CalendarMonth};
pub use mutation::{ConflictReport, MutationOutcome};
pub use projector::occurrences_on_day;
pub use recurrence::{expand, occurs_on};
pub use search::filter_events;
pub use service::EventService;
pub use store::{EventStore, JsonFileStore, MemoryStore};
