//! Event records, recurrence rules and derived occurrences.
//!
//! [`Event`] is what the storage collaborator persists. [`Occurrence`] is a
//! derived, read-only placement of an event on one calendar day and has no
//! path back into storage.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Palette offered to the host UI for event colors.
pub const EVENT_COLORS: [&str; 8] = [
    "#3B82F6", // blue
    "#8B5CF6", // purple
    "#EC4899", // pink
    "#EF4444", // red
    "#F59E0B", // amber
    "#10B981", // emerald
    "#06B6D4", // cyan
    "#6366F1", // indigo
];

pub const DEFAULT_COLOR: &str = EVENT_COLORS[0];

// ---------------------------------------------------------------------------
// Weekdays
// ---------------------------------------------------------------------------

/// Day of the week, numbered Sunday = 0 through Saturday = 6 to match the
/// Sunday-first month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Sunday,
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
    ];

    /// The weekday `date` falls on.
    pub fn of(date: NaiveDate) -> Self {
        Self::from_index(date.weekday().num_days_from_sunday())
    }

    /// Map a Sunday-based index (0..=6) to a weekday; indexes wrap modulo 7.
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 7) as usize]
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            WeekDay::Sunday => "sunday",
            WeekDay::Monday => "monday",
            WeekDay::Tuesday => "tuesday",
            WeekDay::Wednesday => "wednesday",
            WeekDay::Thursday => "thursday",
            WeekDay::Friday => "friday",
            WeekDay::Saturday => "saturday",
        }
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeekDay {
    type Err = String;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        WeekDay::ALL
            .into_iter()
            .find(|day| day.name() == lower || (lower.len() == 3 && day.name().starts_with(&lower)))
            .ok_or_else(|| format!("unknown weekday '{}'", s))
    }
}

// ---------------------------------------------------------------------------
// Recurrence
// ---------------------------------------------------------------------------

fn default_interval() -> u32 {
    1
}

/// The repetition pattern of a series. Each variant carries exactly the
/// fields it needs.
///
/// For `Daily`, `Weekly` and `Monthly` an interval of 0 is read as 1. A
/// `Custom` interval of 0 never recurs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "lowercase")]
pub enum RecurrencePattern {
    #[default]
    None,
    Daily {
        #[serde(default = "default_interval")]
        interval: u32,
    },
    Weekly {
        #[serde(default = "default_interval")]
        interval: u32,
        /// Empty means "the weekday of the series anchor".
        #[serde(default)]
        week_days: BTreeSet<WeekDay>,
    },
    Monthly {
        #[serde(default = "default_interval")]
        interval: u32,
    },
    Custom {
        interval_days: u32,
    },
}

impl RecurrencePattern {
    pub fn daily(interval: u32) -> Self {
        RecurrencePattern::Daily { interval }
    }

    pub fn weekly(interval: u32, week_days: impl IntoIterator<Item = WeekDay>) -> Self {
        RecurrencePattern::Weekly {
            interval,
            week_days: week_days.into_iter().collect(),
        }
    }

    pub fn monthly(interval: u32) -> Self {
        RecurrencePattern::Monthly { interval }
    }

    pub fn custom(interval_days: u32) -> Self {
        RecurrencePattern::Custom { interval_days }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecurrencePattern::None => "none",
            RecurrencePattern::Daily { .. } => "daily",
            RecurrencePattern::Weekly { .. } => "weekly",
            RecurrencePattern::Monthly { .. } => "monthly",
            RecurrencePattern::Custom { .. } => "custom",
        }
    }
}

/// A recurrence pattern plus an optional inclusive end date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecurrenceRule {
    #[serde(flatten)]
    pub pattern: RecurrencePattern,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    /// A rule that never repeats.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(pattern: RecurrencePattern) -> Self {
        Self {
            pattern,
            end_date: None,
        }
    }

    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.pattern != RecurrencePattern::None
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A stored calendar event. For a recurring event, `date` is the anchor of
/// the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub description: String,
    pub color: String,
    pub recurrence: RecurrenceRule,
}

impl Event {
    /// Generate a fresh opaque event id.
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }
}

/// A concrete placement of an event on one calendar day.
///
/// Occurrences are recomputed on every query and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// The event the occurrence was derived from, used as a display template.
    pub event: Event,
    /// Id of the series this is an instance of; `None` for one-off events.
    pub source_event_id: Option<String>,
    pub occurrence_date: NaiveDate,
}

impl Occurrence {
    /// The sole occurrence of a non-recurring event, at its own date.
    pub fn single(event: &Event) -> Self {
        Self {
            event: event.clone(),
            source_event_id: None,
            occurrence_date: event.date,
        }
    }

    /// An instance of a recurring series on `date`.
    pub fn instance(event: &Event, date: NaiveDate) -> Self {
        Self {
            event: event.clone(),
            source_event_id: Some(event.id.clone()),
            occurrence_date: date,
        }
    }

    pub fn is_instance(&self) -> bool {
        self.source_event_id.is_some()
    }

    /// Id of the stored event behind this occurrence.
    pub fn series_id(&self) -> &str {
        self.source_event_id.as_deref().unwrap_or(&self.event.id)
    }

    pub fn start_time(&self) -> NaiveTime {
        self.event.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.event.end_time
    }
}

/// `HH:MM` time-of-day encoding. Decoding also accepts `HH:MM:SS`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn parse(s: &str) -> Option<NaiveTime> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{}'", raw)))
    }
}
