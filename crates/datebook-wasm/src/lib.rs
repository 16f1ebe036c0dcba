//! WASM bindings for datebook-engine.
//!
//! Exposes the month grid, day projection, search and the conflict-checked
//! mutations to JavaScript via `wasm-bindgen`. The host owns the event
//! collection: every call takes it as a JSON array (the storage format) and
//! mutations hand back the updated array for the host to persist.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p datebook-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/datebook-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/datebook_wasm.wasm
//! ```

use chrono::NaiveDate;
use datebook_engine::event::{Event, Occurrence};
use datebook_engine::form::EventForm;
use datebook_engine::grid::{CalendarDay, CalendarMonth};
use datebook_engine::mutation::{self, MutationOutcome};
use datebook_engine::store::decode_events;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct OccurrenceDto<'a> {
    #[serde(flatten)]
    occurrence: &'a Occurrence,
    series_id: &'a str,
    is_instance: bool,
}

impl<'a> From<&'a Occurrence> for OccurrenceDto<'a> {
    fn from(o: &'a Occurrence) -> Self {
        Self {
            occurrence: o,
            series_id: o.series_id(),
            is_instance: o.is_instance(),
        }
    }
}

#[derive(Serialize)]
struct CalendarDayDto<'a> {
    date: NaiveDate,
    is_in_target_month: bool,
    is_today: bool,
    occurrences: Vec<OccurrenceDto<'a>>,
}

impl<'a> From<&'a CalendarDay> for CalendarDayDto<'a> {
    fn from(d: &'a CalendarDay) -> Self {
        Self {
            date: d.date,
            is_in_target_month: d.is_in_target_month,
            is_today: d.is_today,
            occurrences: d.occurrences.iter().map(OccurrenceDto::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct CalendarMonthDto<'a> {
    year: i32,
    month: u32,
    title: String,
    days: Vec<CalendarDayDto<'a>>,
}

/// Result of a conflict-checked mutation, tagged by `status`.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum OutcomeDto<'a> {
    Applied {
        events: &'a [Event],
    },
    Conflict {
        conflicting: OccurrenceDto<'a>,
        proposed: &'a Event,
    },
}

impl<'a> From<&'a MutationOutcome> for OutcomeDto<'a> {
    fn from(outcome: &'a MutationOutcome) -> Self {
        match outcome {
            MutationOutcome::Applied(events) => OutcomeDto::Applied { events },
            MutationOutcome::Conflict(report) => OutcomeDto::Conflict {
                conflicting: OccurrenceDto::from(&report.conflicting),
                proposed: &report.proposed,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The host's stored collection. Like any stored collection, one that fails
/// to decode reads as empty.
fn parse_events(json: &str) -> Vec<Event> {
    decode_events(json)
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_form(json: &str) -> Result<EventForm, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid form JSON: {}", e))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn to_js(err: String) -> JsValue {
    JsValue::from_str(&err)
}

fn month_json(events_json: &str, anchor: &str, today: &str) -> Result<String, String> {
    let events = parse_events(events_json);
    let anchor = parse_date(anchor)?;
    let today = parse_date(today)?;

    let month: CalendarMonth = datebook_engine::build_month(anchor, &events, today);
    to_json(&CalendarMonthDto {
        year: month.year,
        month: month.month,
        title: datebook_engine::calendar_math::format_month_year(anchor),
        days: month.days.iter().map(CalendarDayDto::from).collect(),
    })
}

fn day_json(events_json: &str, date: &str) -> Result<String, String> {
    let events = parse_events(events_json);
    let occurrences = datebook_engine::occurrences_on_day(parse_date(date)?, &events);
    let dtos: Vec<OccurrenceDto> = occurrences.iter().map(OccurrenceDto::from).collect();
    to_json(&dtos)
}

fn create_json(events_json: &str, form_json: &str) -> Result<String, String> {
    let events = parse_events(events_json);
    let draft = parse_form(form_json)?.validate().map_err(|e| e.to_string())?;
    to_json(&OutcomeDto::from(&mutation::create(&events, draft)))
}

fn update_json(events_json: &str, id: &str, form_json: &str) -> Result<String, String> {
    let events = parse_events(events_json);
    let draft = parse_form(form_json)?.validate().map_err(|e| e.to_string())?;
    to_json(&OutcomeDto::from(&mutation::update(&events, id, draft)))
}

fn move_json(events_json: &str, id: &str, new_date: &str) -> Result<String, String> {
    let events = parse_events(events_json);
    let outcome = mutation::move_event(&events, id, parse_date(new_date)?);
    to_json(&OutcomeDto::from(&outcome))
}

fn force_apply_json(events_json: &str, proposed_json: &str) -> Result<String, String> {
    let events = parse_events(events_json);
    let proposed: Event = serde_json::from_str(proposed_json)
        .map_err(|e| format!("Invalid event JSON: {}", e))?;
    to_json(&mutation::force_apply(&events, proposed))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Build the week-aligned month grid containing `anchor`.
///
/// Returns `{year, month, title, days}` where each day carries its
/// occurrences (one-off events first, then recurring instances).
///
/// # Arguments
/// - `events_json` -- JSON array of stored events
/// - `anchor` -- Any date in the month, as `YYYY-MM-DD`
/// - `today` -- The host's current local date, as `YYYY-MM-DD`
#[wasm_bindgen(js_name = "buildMonth")]
pub fn build_month(events_json: &str, anchor: &str, today: &str) -> Result<String, JsValue> {
    month_json(events_json, anchor, today).map_err(to_js)
}

/// All occurrences on one day, as a JSON array.
#[wasm_bindgen(js_name = "occurrencesOnDay")]
pub fn occurrences_on_day(events_json: &str, date: &str) -> Result<String, JsValue> {
    day_json(events_json, date).map_err(to_js)
}

/// Events whose title or description contains `term`, ignoring case.
#[wasm_bindgen(js_name = "filterEvents")]
pub fn filter_events(events_json: &str, term: &str) -> Result<String, JsValue> {
    let events = parse_events(events_json);
    to_json(&datebook_engine::filter_events(&events, term)).map_err(to_js)
}

/// A blank form for `date` (09:00 to 10:00, default color).
#[wasm_bindgen(js_name = "newEventForm")]
pub fn new_event_form(date: &str) -> Result<String, JsValue> {
    let date = parse_date(date).map_err(to_js)?;
    to_json(&EventForm::for_date(date)).map_err(to_js)
}

/// Validate a form and add it as a new event.
///
/// Returns `{status: "applied", events}` or
/// `{status: "conflict", conflicting, proposed}`. Validation failures are
/// thrown as errors.
#[wasm_bindgen(js_name = "createEvent")]
pub fn create_event(events_json: &str, form_json: &str) -> Result<String, JsValue> {
    create_json(events_json, form_json).map_err(to_js)
}

/// Validate a form and replace the event with `id`, keeping the id.
#[wasm_bindgen(js_name = "updateEvent")]
pub fn update_event(events_json: &str, id: &str, form_json: &str) -> Result<String, JsValue> {
    update_json(events_json, id, form_json).map_err(to_js)
}

/// Remove the event with `id`. Returns the remaining events.
#[wasm_bindgen(js_name = "deleteEvent")]
pub fn delete_event(events_json: &str, id: &str, delete_all_in_series: bool) -> Result<String, JsValue> {
    let events = parse_events(events_json);
    to_json(&mutation::delete(&events, id, delete_all_in_series)).map_err(to_js)
}

/// Move an event (a whole series, by its anchor) to `new_date`.
///
/// `id` may be an instance's `series_id`. Same result shape as `createEvent`.
#[wasm_bindgen(js_name = "moveEvent")]
pub fn move_event(events_json: &str, id: &str, new_date: &str) -> Result<String, JsValue> {
    move_json(events_json, id, new_date).map_err(to_js)
}

/// Store the `proposed` event from a conflict report without checking again.
#[wasm_bindgen(js_name = "forceApply")]
pub fn force_apply(events_json: &str, proposed_json: &str) -> Result<String, JsValue> {
    force_apply_json(events_json, proposed_json).map_err(to_js)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn events() -> String {
        json!([
            {
                "id": "standup", "title": "Standup", "date": "2024-03-01",
                "start_time": "09:00", "end_time": "09:15", "description": "", "color": "#3B82F6",
                "recurrence": { "pattern": "daily", "interval": 1, "end_date": null }
            },
            {
                "id": "dentist", "title": "Dentist", "date": "2024-03-08",
                "start_time": "12:00", "end_time": "13:00", "description": "", "color": "#EF4444",
                "recurrence": { "pattern": "none" }
            }
        ])
        .to_string()
    }

    fn form(date: &str, start: &str, end: &str) -> String {
        json!({ "title": "Review", "date": date, "start_time": start, "end_time": end }).to_string()
    }

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn month_carries_title_and_instance_flags() {
        let month = parse(&month_json(&events(), "2024-03-15", "2024-03-08").unwrap());

        assert_eq!(month["title"], "March 2024");
        assert_eq!(month["days"].as_array().unwrap().len(), 42);

        let day = month["days"]
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["date"] == "2024-03-08")
            .unwrap();
        assert_eq!(day["is_today"], true);
        assert_eq!(day["occurrences"][0]["event"]["title"], "Dentist");
        assert_eq!(day["occurrences"][0]["is_instance"], false);
        assert_eq!(day["occurrences"][1]["is_instance"], true);
        assert_eq!(day["occurrences"][1]["series_id"], "standup");
    }

    #[test]
    fn create_reports_conflict_with_the_standup() {
        let outcome = parse(&create_json(&events(), &form("2024-03-05", "09:10", "10:00")).unwrap());

        assert_eq!(outcome["status"], "conflict");
        assert_eq!(outcome["conflicting"]["series_id"], "standup");
        assert_eq!(outcome["proposed"]["title"], "Review");

        let forced = parse(
            &force_apply_json(&events(), &outcome["proposed"].to_string()).unwrap(),
        );
        assert_eq!(forced.as_array().unwrap().len(), 3);
    }

    #[test]
    fn create_applies_free_slot() {
        let outcome = parse(&create_json(&events(), &form("2024-03-05", "14:00", "15:00")).unwrap());

        assert_eq!(outcome["status"], "applied");
        assert_eq!(outcome["events"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn invalid_form_is_an_error() {
        let err = create_json(&events(), r#"{"date": "2024-03-05"}"#).unwrap_err();
        assert!(err.contains("title is required"));
    }

    #[test]
    fn move_to_a_free_day_applies() {
        let outcome = parse(&move_json(&events(), "dentist", "2024-03-09").unwrap());
        assert_eq!(outcome["status"], "applied");

        let day = parse(&day_json(&events(), "2024-03-09").unwrap());
        assert_eq!(day.as_array().unwrap().len(), 1);
    }

    #[test]
    fn bad_inputs_are_errors() {
        assert!(parse_date("03/08/2024").is_err());
        assert!(day_json(&events(), "tomorrow").is_err());
        assert!(create_json(&events(), "{").is_err());
    }

    #[test]
    fn corrupt_collection_reads_as_empty() {
        assert!(parse_events("{").is_empty());

        let month = parse(&month_json("[{\"id\": 1", "2024-03-15", "2024-03-08").unwrap());
        let days = month["days"].as_array().unwrap();
        assert_eq!(days.len(), 42);
        assert!(days.iter().all(|d| d["occurrences"].as_array().unwrap().is_empty()));

        let outcome = parse(&create_json("not json", &form("2024-03-05", "09:10", "10:00")).unwrap());
        assert_eq!(outcome["status"], "applied");
        assert_eq!(outcome["events"].as_array().unwrap().len(), 1);
    }
}
