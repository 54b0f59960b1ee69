//! Merge busy intervals and find the earliest free slot.
//!
//! Sorts intervals by start time, merges overlapping or touching busy periods,
//! then walks a cursor through the merged periods looking for the first gap
//! long enough to hold the requested duration.

use chrono::{DateTime, Duration, Utc};

use crate::interval::Interval;

/// Merge overlapping or touching busy intervals.
///
/// Returns a sorted, non-overlapping, minimal list covering the same time as
/// the input. Intervals that touch (`a.end == b.start`) are merged, so
/// back-to-back meetings become one contiguous busy block.
pub fn merge_busy_intervals<I>(intervals: I) -> Vec<Interval>
where
    I: IntoIterator<Item = Interval>,
{
    let mut intervals: Vec<Interval> = intervals.into_iter().collect();

    // Sort by start time (then by end time for stability).
    intervals.sort_by_key(|i| (i.start(), i.end()));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start() <= last.end() {
                // Overlapping or touching: extend the current block.
                *last = last.extended_to(interval.end());
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Find the earliest start of a free run of `duration` inside
/// `[window_start, window_end)`.
///
/// `busy` must already be merged (see [`merge_busy_intervals`]) and must only
/// contain intervals overlapping the window; intervals outside it still move the
/// cursor. A slot may begin exactly when a busy block ends and may end exactly
/// when the next one starts.
///
/// Returns `None` when no gap is large enough. The caller is responsible for
/// rejecting a non-positive `duration`.
pub fn find_earliest_start(
    busy: &[Interval],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    duration: Duration,
) -> Option<DateTime<Utc>> {
    let fits_before = |cursor: DateTime<Utc>, limit: DateTime<Utc>| {
        cursor
            .checked_add_signed(duration)
            .is_some_and(|slot_end| slot_end <= limit)
    };

    let mut cursor = window_start;

    for block in busy {
        if fits_before(cursor, block.start()) {
            return Some(cursor);
        }
        if cursor < block.end() {
            cursor = block.end();
        }
    }

    // Trailing gap after the last busy block.
    fits_before(cursor, window_end).then_some(cursor)
}
