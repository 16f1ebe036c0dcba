//! Tests for recurrence evaluation and range expansion.

use chrono::{NaiveDate, NaiveTime};
use datebook_engine::event::{Event, RecurrencePattern, RecurrenceRule, WeekDay};
use datebook_engine::recurrence::{first_occurrence, occurrence_dates};
use datebook_engine::{expand, occurs_on};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn event_with(anchor: &str, recurrence: RecurrenceRule) -> Event {
    Event {
        id: "series-1".to_string(),
        title: "Standup".to_string(),
        date: date(anchor),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        description: String::new(),
        color: "#3B82F6".to_string(),
        recurrence,
    }
}

fn repeating(anchor: &str, pattern: RecurrencePattern) -> Event {
    event_with(anchor, RecurrenceRule::new(pattern))
}

// ── Weekly ──────────────────────────────────────────────────────────────────

#[test]
fn weekly_friday_matches_next_friday_not_thursday() {
    // 2024-03-01 is a Friday.
    let e = repeating("2024-03-01", RecurrencePattern::weekly(1, [WeekDay::Friday]));

    assert!(occurs_on(&e, date("2024-03-08")), "next Friday");
    assert!(!occurs_on(&e, date("2024-03-07")), "Thursday");
    assert!(occurs_on(&e, date("2024-03-01")), "the anchor is itself a Friday");
}

#[test]
fn biweekly_multi_day_counts_weeks_from_anchor() {
    // Anchor Monday 2024-03-04, every other week on Monday and Wednesday.
    let e = repeating(
        "2024-03-04",
        RecurrencePattern::weekly(2, [WeekDay::Monday, WeekDay::Wednesday]),
    );

    assert!(occurs_on(&e, date("2024-03-04")));
    assert!(occurs_on(&e, date("2024-03-06")));
    assert!(!occurs_on(&e, date("2024-03-11")), "odd week skipped");
    assert!(!occurs_on(&e, date("2024-03-13")), "odd week skipped");
    assert!(occurs_on(&e, date("2024-03-18")));
    assert!(occurs_on(&e, date("2024-03-20")));
    assert!(!occurs_on(&e, date("2024-03-19")), "Tuesday is not selected");
}

#[test]
fn weekly_empty_day_set_uses_anchor_weekday_without_mutating_rule() {
    let e = repeating("2024-03-01", RecurrencePattern::weekly(1, Vec::<WeekDay>::new()));
    let before = e.clone();

    assert!(occurs_on(&e, date("2024-03-08")));
    assert!(!occurs_on(&e, date("2024-03-09")));
    assert!(occurs_on(&e, date("2024-03-15")));

    assert_eq!(e, before, "evaluation must not write the default back");
    match &e.recurrence.pattern {
        RecurrencePattern::Weekly { week_days, .. } => assert!(week_days.is_empty()),
        other => panic!("unexpected pattern {:?}", other),
    }
}

#[test]
fn weekly_anchor_off_pattern_is_not_an_occurrence() {
    // Anchor Friday, but only Mondays selected.
    let e = repeating("2024-03-01", RecurrencePattern::weekly(1, [WeekDay::Monday]));

    assert!(!occurs_on(&e, date("2024-03-01")));
    assert!(occurs_on(&e, date("2024-03-04")));
}

#[test]
fn first_occurrence_skips_an_off_pattern_anchor() {
    let monday_only = repeating("2024-03-01", RecurrencePattern::weekly(2, [WeekDay::Monday]));
    assert_eq!(first_occurrence(&monday_only), Some(date("2024-03-04")));

    let daily = repeating("2024-03-01", RecurrencePattern::daily(3));
    assert_eq!(first_occurrence(&daily), Some(date("2024-03-01")));

    let single = event_with("2024-03-01", RecurrenceRule::none());
    assert_eq!(first_occurrence(&single), Some(date("2024-03-01")));
}

#[test]
fn first_occurrence_is_none_when_the_series_never_lands() {
    let ended = event_with(
        "2024-03-01",
        RecurrenceRule::new(RecurrencePattern::weekly(1, [WeekDay::Monday])).until(date("2024-03-03")),
    );
    assert_eq!(first_occurrence(&ended), None);

    assert_eq!(first_occurrence(&repeating("2024-03-01", RecurrencePattern::custom(0))), None);
}

// ── Daily ───────────────────────────────────────────────────────────────────

#[test]
fn daily_every_third_day() {
    let e = repeating("2024-03-01", RecurrencePattern::daily(3));

    assert!(occurs_on(&e, date("2024-03-01")));
    assert!(occurs_on(&e, date("2024-03-04")));
    assert!(occurs_on(&e, date("2024-03-07")));
    assert!(!occurs_on(&e, date("2024-03-05")));
}

#[test]
fn daily_zero_interval_behaves_as_one() {
    let e = repeating("2024-03-01", RecurrencePattern::daily(0));

    assert!(occurs_on(&e, date("2024-03-02")));
    assert!(occurs_on(&e, date("2024-03-03")));
}

#[test]
fn nothing_before_the_anchor() {
    let e = repeating("2024-03-01", RecurrencePattern::daily(1));
    assert!(!occurs_on(&e, date("2024-02-29")));
}

#[test]
fn end_date_is_inclusive() {
    let e = event_with(
        "2024-03-01",
        RecurrenceRule::new(RecurrencePattern::daily(1)).until(date("2024-03-07")),
    );

    assert!(occurs_on(&e, date("2024-03-07")), "last valid occurrence");
    assert!(!occurs_on(&e, date("2024-03-08")), "expired");
}

// ── Monthly ─────────────────────────────────────────────────────────────────

#[test]
fn monthly_same_day_of_month() {
    let e = repeating("2024-01-15", RecurrencePattern::monthly(1));

    assert!(occurs_on(&e, date("2024-02-15")));
    assert!(occurs_on(&e, date("2025-01-15")), "crosses the year boundary");
    assert!(!occurs_on(&e, date("2024-02-14")));
}

#[test]
fn monthly_interval_counts_calendar_months() {
    let e = repeating("2024-01-15", RecurrencePattern::monthly(2));

    assert!(!occurs_on(&e, date("2024-02-15")));
    assert!(occurs_on(&e, date("2024-03-15")));
    assert!(occurs_on(&e, date("2024-11-15")));
    assert!(occurs_on(&e, date("2025-01-15")));
}

#[test]
fn monthly_on_31st_skips_short_months() {
    let e = repeating("2024-01-31", RecurrencePattern::monthly(1));
    let dates = occurrence_dates(&e, date("2024-01-01"), date("2024-06-30"));

    assert_eq!(
        dates,
        vec![date("2024-01-31"), date("2024-03-31"), date("2024-05-31")]
    );
}

// ── Custom ──────────────────────────────────────────────────────────────────

#[test]
fn custom_every_ten_days() {
    let e = repeating("2024-03-01", RecurrencePattern::custom(10));

    assert!(occurs_on(&e, date("2024-03-11")));
    assert!(occurs_on(&e, date("2024-03-21")));
    assert!(!occurs_on(&e, date("2024-03-12")));
}

#[test]
fn custom_zero_interval_never_recurs() {
    let e = repeating("2024-03-01", RecurrencePattern::custom(0));

    assert!(!occurs_on(&e, date("2024-03-01")), "fails closed, even at the anchor");
    assert!(expand(&e, date("2024-03-01"), date("2024-12-31")).is_empty());
}

// ── Non-recurring ───────────────────────────────────────────────────────────

#[test]
fn non_recurring_occurs_only_on_its_date() {
    let e = event_with("2024-03-01", RecurrenceRule::none());

    assert!(occurs_on(&e, date("2024-03-01")));
    assert!(!occurs_on(&e, date("2024-03-02")));
}

#[test]
fn expand_non_recurring_over_its_own_date_yields_one_occurrence() {
    let e = event_with("2024-03-01", RecurrenceRule::none());
    let occurrences = expand(&e, e.date, e.date);

    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].occurrence_date, e.date);
    assert!(!occurrences[0].is_instance());
    assert_eq!(occurrences[0].series_id(), "series-1");
}

#[test]
fn expand_non_recurring_outside_range_is_empty() {
    let e = event_with("2024-03-01", RecurrenceRule::none());
    assert!(expand(&e, date("2024-03-02"), date("2024-03-31")).is_empty());
}

// ── Expansion ───────────────────────────────────────────────────────────────

#[test]
fn expand_clips_to_anchor_and_marks_instances() {
    let e = repeating("2024-03-01", RecurrencePattern::daily(1));
    let occurrences = expand(&e, date("2024-02-20"), date("2024-03-05"));

    let dates: Vec<NaiveDate> = occurrences.iter().map(|o| o.occurrence_date).collect();
    assert_eq!(
        dates,
        vec![
            date("2024-03-01"),
            date("2024-03-02"),
            date("2024-03-03"),
            date("2024-03-04"),
            date("2024-03-05"),
        ]
    );
    for occurrence in &occurrences {
        assert!(occurrence.is_instance());
        assert_eq!(occurrence.source_event_id.as_deref(), Some("series-1"));
        assert_eq!(occurrence.event.date, date("2024-03-01"), "template keeps the anchor");
    }
}

#[test]
fn expand_stops_at_end_date() {
    let e = event_with(
        "2024-03-01",
        RecurrenceRule::new(RecurrencePattern::weekly(1, [WeekDay::Friday]))
            .until(date("2024-03-15")),
    );
    let dates = occurrence_dates(&e, date("2024-03-01"), date("2024-04-30"));

    assert_eq!(
        dates,
        vec![date("2024-03-01"), date("2024-03-08"), date("2024-03-15")]
    );
}

#[test]
fn expand_empty_when_range_is_inverted() {
    let e = repeating("2024-03-01", RecurrencePattern::daily(1));
    assert!(expand(&e, date("2024-03-10"), date("2024-03-05")).is_empty());
}

#[test]
fn expand_matches_per_day_evaluation() {
    let e = repeating(
        "2024-02-27",
        RecurrencePattern::weekly(3, [WeekDay::Tuesday, WeekDay::Saturday]),
    );
    let start = date("2024-01-01");
    let end = date("2024-12-31");

    let expected: Vec<NaiveDate> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| occurs_on(&e, *d))
        .collect();
    let expanded: Vec<NaiveDate> = expand(&e, start, end)
        .into_iter()
        .map(|o| o.occurrence_date)
        .collect();

    assert_eq!(expanded, expected);
}
