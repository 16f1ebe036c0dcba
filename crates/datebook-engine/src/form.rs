//! Event form data as submitted by the host UI, and its validation into a
//! draft the mutation operations accept.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::event::{hhmm, Event, RecurrencePattern, RecurrenceRule, WeekDay, DEFAULT_COLOR};
use crate::error::ValidationError;

/// Raw form fields. Dates are `YYYY-MM-DD`, times `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub recurrence: RecurrenceRule,
}

impl EventForm {
    /// A blank form for `date` with the default one-hour 09:00 slot.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            date: date.format("%Y-%m-%d").to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            description: String::new(),
            color: DEFAULT_COLOR.to_string(),
            recurrence: RecurrenceRule::none(),
        }
    }

    /// A form pre-filled from a stored event, for editing.
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            date: event.date.format("%Y-%m-%d").to_string(),
            start_time: event.start_time.format("%H:%M").to_string(),
            end_time: event.end_time.format("%H:%M").to_string(),
            description: event.description.clone(),
            color: event.color.clone(),
            recurrence: event.recurrence.clone(),
        }
    }

    /// Check required fields and parse dates and times.
    pub fn validate(&self) -> Result<EventDraft, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let date = parse_date(&self.date)?.ok_or(ValidationError::MissingDate)?;
        let start_time = parse_time(&self.start_time)?.ok_or(ValidationError::MissingStartTime)?;
        let end_time = parse_time(&self.end_time)?.ok_or(ValidationError::MissingEndTime)?;

        let color = if self.color.trim().is_empty() {
            DEFAULT_COLOR.to_string()
        } else {
            self.color.trim().to_string()
        };

        Ok(EventDraft {
            title: title.to_string(),
            date,
            start_time,
            end_time,
            description: self.description.clone(),
            color,
            recurrence: self.recurrence.clone(),
        })
    }
}

/// The default pattern the form switches to when the user picks a pattern by
/// name: weekly starts on Monday, every other interval starts at 1.
pub fn default_pattern(name: &str) -> Option<RecurrencePattern> {
    let pattern = match name.trim().to_ascii_lowercase().as_str() {
        "none" => RecurrencePattern::None,
        "daily" => RecurrencePattern::daily(1),
        "weekly" => RecurrencePattern::weekly(1, [WeekDay::Monday]),
        "monthly" => RecurrencePattern::monthly(1),
        "custom" => RecurrencePattern::custom(1),
        _ => return None,
    };
    Some(pattern)
}

/// A validated form, ready to become an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: String,
    pub color: String,
    pub recurrence: RecurrenceRule,
}

impl EventDraft {
    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description,
            color: self.color,
            recurrence: self.recurrence,
        }
    }
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

fn parse_time(raw: &str) -> Result<Option<NaiveTime>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    hhmm::parse(raw)
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidTime(raw.to_string()))
}
