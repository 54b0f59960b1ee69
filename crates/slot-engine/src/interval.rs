//! Half-open time intervals.
//!
//! An [`Interval`] is the value every other module trades in: a meeting's busy
//! time, a merged busy block, and the slot handed back to the caller are all
//! intervals. Construction is fallible so that `start < end` holds for every
//! interval that exists.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};

/// A half-open range of time `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unvalidated wire shape; deserialization goes through [`Interval::new`].
#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for Interval {
    type Error = SchedulingError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.start, raw.end)
    }
}

impl Interval {
    /// Create an interval.
    ///
    /// # Errors
    /// Returns `SchedulingError::InvalidInterval` when `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(SchedulingError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create an interval of `duration` beginning at `start`.
    ///
    /// # Errors
    /// Returns `SchedulingError::NonPositiveDuration` for a zero or negative
    /// duration, and `SchedulingError::InvalidInterval` if the end is not
    /// representable.
    pub fn starting_at(start: DateTime<Utc>, duration: Duration) -> Result<Self> {
        if duration <= Duration::zero() {
            return Err(SchedulingError::NonPositiveDuration(duration));
        }
        let end = start
            .checked_add_signed(duration)
            .ok_or(SchedulingError::InvalidInterval { start, end: start })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The interval with its end pushed out to `end`, if that is later.
    pub(crate) fn extended_to(self, end: DateTime<Utc>) -> Self {
        Self {
            start: self.start,
            end: self.end.max(end),
        }
    }

    /// True when the two intervals share any instant.
    ///
    /// Touching intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when the interval overlaps the window `[window_start, window_end)`.
    ///
    /// Uses the same strict test as [`Interval::overlaps`]: an interval ending
    /// exactly at `window_start`, or starting exactly at `window_end`, is outside.
    pub fn overlaps_window(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> bool {
        self.end > window_start && self.start < window_end
    }

    /// True when `other` lies entirely within this interval.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
