//! Slot availability from a working-hours template and busy calendar time.
//!
//! Walks each day of the requested range in order, cuts the working window into
//! fixed-length slots, drops slots that start too early, then sweeps the merged
//! busy intervals alongside the ascending slots to detect overlaps.
//!
//! The calculator does no I/O and no timezone conversion: every timestamp is
//! wall-clock time in the practitioner's zone.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta};
use tracing::{debug, trace};

use crate::config::WorkingHoursConfig;
use crate::error::Result;
use crate::interval::{merge_busy, BusyInterval};
use crate::slot::Slot;

#[derive(Debug, Default)]
struct ScanStats {
    generated: usize,
    too_early: usize,
    busy: usize,
}

/// Compute the bookable slots between two days (inclusive).
///
/// Slots overlapping any busy interval are omitted, so every returned slot has
/// `available == true`. Output is ascending by start.
///
/// `range_start > range_end` yields an empty list rather than an error.
///
/// # Errors
/// Returns `SlotError::InvalidConfiguration` if `config` fails validation and
/// `SlotError::MalformedInterval` if any busy interval has `start >= end`.
pub fn compute_available_slots(
    config: &WorkingHoursConfig,
    busy: &[BusyInterval],
    range_start: NaiveDate,
    range_end: NaiveDate,
    now: NaiveDateTime,
) -> Result<Vec<Slot>> {
    let grid = slot_grid(config, busy, range_start, range_end, now)?;
    Ok(grid.into_iter().filter(|s| s.available).collect())
}

/// Like [`compute_available_slots`], but keeps busy slots flagged with
/// `available == false` instead of dropping them.
///
/// Slots that start too early are still dropped.
pub fn slot_grid(
    config: &WorkingHoursConfig,
    busy: &[BusyInterval],
    range_start: NaiveDate,
    range_end: NaiveDate,
    now: NaiveDateTime,
) -> Result<Vec<Slot>> {
    config.validate()?;
    for interval in busy {
        interval.check()?;
    }

    if range_start > range_end || config.working_days.is_empty() {
        return Ok(Vec::new());
    }

    let earliest_start = now + TimeDelta::minutes(i64::from(config.min_advance_booking_minutes));
    let last_day = match config.max_advance_booking_days {
        Some(days) => now
            .date()
            .checked_add_days(Days::new(u64::from(days)))
            .map_or(range_end, |horizon| horizon.min(range_end)),
        None => range_end,
    };

    let merged = merge_busy(busy);
    let duration = config.slot_duration();
    let per_day = config.slots_per_day();

    let mut stats = ScanStats::default();
    let mut slots = Vec::new();
    // Index of the first merged interval that may still overlap a later slot.
    let mut cursor = 0;

    for day in range_start.iter_days().take_while(|d| *d <= last_day) {
        if !config.works_on(day.weekday()) {
            trace!(%day, "skipping non-working day");
            continue;
        }

        for index in 0..per_day {
            let start = config.slot_start(day, index);
            let end = start + duration;
            stats.generated += 1;

            if start < earliest_start {
                stats.too_early += 1;
                continue;
            }

            while cursor < merged.len() && merged[cursor].end <= start {
                cursor += 1;
            }
            let available = merged
                .get(cursor)
                .is_none_or(|interval| !interval.overlaps(start, end));
            if !available {
                stats.busy += 1;
            }

            slots.push(Slot {
                start,
                end,
                available,
            });
        }
    }

    debug!(
        %range_start,
        %last_day,
        generated = stats.generated,
        too_early = stats.too_early,
        busy = stats.busy,
        available = stats.generated - stats.too_early - stats.busy,
        "computed slot grid"
    );

    Ok(slots)
}
