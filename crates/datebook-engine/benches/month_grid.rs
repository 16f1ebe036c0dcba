use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{criterion_group, criterion_main, Criterion};
use datebook_engine::event::{Event, RecurrencePattern, RecurrenceRule, WeekDay};
use datebook_engine::{build_month, mutation};
use std::hint::black_box;

/// A few hundred events: a mix of one-off entries and every recurrence pattern.
fn sample_events(count: usize) -> Vec<Event> {
    let anchor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            let pattern = match i % 5 {
                0 => RecurrencePattern::None,
                1 => RecurrencePattern::daily((i % 3) as u32 + 1),
                2 => RecurrencePattern::weekly(1, [WeekDay::from_index(i as u32), WeekDay::Friday]),
                3 => RecurrencePattern::monthly(1),
                _ => RecurrencePattern::custom((i % 9) as u32 + 2),
            };
            let start = NaiveTime::from_hms_opt((i % 10) as u32 + 8, 0, 0).unwrap();
            Event {
                id: format!("event-{}", i),
                title: format!("Event {}", i),
                date: anchor + Duration::days((i % 120) as i64),
                start_time: start,
                end_time: start + Duration::minutes(45),
                description: String::new(),
                color: "#3B82F6".to_string(),
                recurrence: RecurrenceRule::new(pattern),
            }
        })
        .collect()
}

fn bench_build_month(c: &mut Criterion) {
    let events = sample_events(300);
    let anchor = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

    c.bench_function("build_month/300_events", |b| {
        b.iter(|| build_month(black_box(anchor), black_box(&events), anchor))
    });
}

fn bench_conflict_check(c: &mut Criterion) {
    let events = sample_events(300);
    let candidate = events[7].clone();

    c.bench_function("check_conflict/300_events", |b| {
        b.iter(|| mutation::check_conflict(black_box(&candidate), black_box(&events)))
    });
}

criterion_group!(benches, bench_build_month, bench_conflict_check);
criterion_main!(benches);
