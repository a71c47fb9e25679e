//! Busy intervals and the half-open overlap rule.
//!
//! All timestamps are wall-clock times in the practitioner's zone. Adjacent
//! intervals (one ends exactly when the other starts) do NOT overlap.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A period already occupied on the practitioner's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BusyInterval {
    /// Build an interval, rejecting `start >= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        let interval = Self { start, end };
        interval.check()?;
        Ok(interval)
    }

    /// Re-check the `start < end` invariant, e.g. after deserialization.
    pub fn check(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(SlotError::MalformedInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        overlaps(self.start, self.end, start, end)
    }
}

/// Two half-open intervals overlap iff `a_start < b_end && a_end > b_start`.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Merge overlapping or adjacent busy intervals.
///
/// Returns a sorted, non-overlapping list. Input order does not matter.
pub fn merge_busy(busy: &[BusyInterval]) -> Vec<BusyInterval> {
    let mut intervals: Vec<BusyInterval> = busy.to_vec();
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}
