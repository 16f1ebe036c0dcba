//! Detect overlapping occurrences on the same calendar day.
//!
//! Times are compared as offsets within one day. Intervals are closed, so an
//! occurrence ending exactly when another starts IS a conflict. Occurrences on
//! different days never conflict.

use crate::event::Occurrence;

/// Whether two occurrences overlap in time on the same day.
///
/// Two closed intervals intersect iff `a.start <= b.end && b.start <= a.end`.
pub fn overlaps(a: &Occurrence, b: &Occurrence) -> bool {
    if a.occurrence_date != b.occurrence_date {
        return false;
    }

    a.start_time() <= b.end_time() && b.start_time() <= a.end_time()
}

/// The first occurrence in `pool` that overlaps `candidate`.
///
/// Occurrences of the candidate's own series are skipped. The scan follows pool
/// order, so the result is deterministic.
pub fn find_conflict<'a>(candidate: &Occurrence, pool: &'a [Occurrence]) -> Option<&'a Occurrence> {
    pool.iter()
        .filter(|other| other.series_id() != candidate.series_id())
        .find(|other| overlaps(candidate, other))
}

/// Every pair of overlapping occurrences within one day's list, in list order.
pub fn find_all_conflicts(occurrences: &[Occurrence]) -> Vec<(&Occurrence, &Occurrence)> {
    let mut conflicts = Vec::new();

    for (i, a) in occurrences.iter().enumerate() {
        for b in &occurrences[i + 1..] {
            if a.series_id() != b.series_id() && overlaps(a, b) {
                conflicts.push((a, b));
            }
        }
    }

    conflicts
}
