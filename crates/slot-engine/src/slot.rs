//! Bookable slots and helpers over computed slot lists.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A fixed-duration window cut from the working-hours template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// `false` only in [`crate::calculator::slot_grid`] output, for slots hit by busy time.
    pub available: bool,
}

impl Slot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

/// Group slots by calendar day, preserving their order within each day.
pub fn group_by_date(slots: &[Slot]) -> BTreeMap<NaiveDate, Vec<Slot>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<Slot>> = BTreeMap::new();
    for slot in slots {
        grouped.entry(slot.date()).or_default().push(*slot);
    }
    grouped
}

/// Sorted, deduplicated days that have at least one available slot.
pub fn available_dates(slots: &[Slot]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = slots
        .iter()
        .filter(|s| s.available)
        .map(Slot::date)
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Whether the exact window `[start, end)` is offered as an available slot.
pub fn is_slot_available(slots: &[Slot], start: NaiveDateTime, end: NaiveDateTime) -> bool {
    slots
        .iter()
        .any(|s| s.available && s.start == start && s.end == end)
}

/// The earliest available slot, regardless of input order.
pub fn next_available_slot(slots: &[Slot]) -> Option<&Slot> {
    slots
        .iter()
        .filter(|s| s.available)
        .min_by_key(|s| s.start)
}
