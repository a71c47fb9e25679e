//! Working-hours configuration: the weekly template slots are cut from.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Recurring weekly template of bookable hours for one practitioner.
///
/// Weekdays are numbered 0–6 with 0 = Sunday. Field names serialize in
/// camelCase (`workingDays`, `startHour`, ...); missing fields take the
/// values of [`WorkingHoursConfig::default`]. Out-of-range weekdays such as
/// `9` or `300` deserialize and are rejected by [`WorkingHoursConfig::validate`];
/// negative numbers fail at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkingHoursConfig {
    pub working_days: BTreeSet<u32>,
    pub start_hour: u32,
    pub start_minute: u32,
    /// May be 24 (with `end_minute == 0`) to mean midnight at the end of the day.
    pub end_hour: u32,
    pub end_minute: u32,
    pub slot_duration_minutes: u32,
    /// Slots must start at least this long after `now`.
    pub min_advance_booking_minutes: u32,
    /// Days further than this from `now` are not offered.
    pub max_advance_booking_days: Option<u32>,
}

impl Default for WorkingHoursConfig {
    /// Monday to Friday, 09:00–18:00, one-hour slots.
    fn default() -> Self {
        Self {
            working_days: [1, 2, 3, 4, 5].into_iter().collect(),
            start_hour: 9,
            start_minute: 0,
            end_hour: 18,
            end_minute: 0,
            slot_duration_minutes: 60,
            min_advance_booking_minutes: 0,
            max_advance_booking_days: None,
        }
    }
}

impl WorkingHoursConfig {
    /// Shorthand for the common whole-hour template.
    pub fn new(
        working_days: impl IntoIterator<Item = u32>,
        start_hour: u32,
        end_hour: u32,
        slot_duration_minutes: u32,
    ) -> Self {
        Self {
            working_days: working_days.into_iter().collect(),
            start_hour,
            start_minute: 0,
            end_hour,
            end_minute: 0,
            slot_duration_minutes,
            min_advance_booking_minutes: 0,
            max_advance_booking_days: None,
        }
    }

    /// Check every field, returning `InvalidConfiguration` on the first violation.
    pub fn validate(&self) -> Result<()> {
        if let Some(day) = self.working_days.iter().find(|&&d| d > 6) {
            return Err(invalid(format!("weekday {} is outside 0-6", day)));
        }
        if self.start_hour > 23 {
            return Err(invalid(format!("startHour {} is outside 0-23", self.start_hour)));
        }
        if self.end_hour > 24 || (self.end_hour == 24 && self.end_minute != 0) {
            return Err(invalid(format!(
                "end time {:02}:{:02} is past midnight",
                self.end_hour, self.end_minute
            )));
        }
        if self.start_minute > 59 || self.end_minute > 59 {
            return Err(invalid("minutes must be within 0-59".to_string()));
        }
        if self.window_start_minute() >= self.window_end_minute() {
            return Err(invalid(format!(
                "start {:02}:{:02} must be before end {:02}:{:02}",
                self.start_hour, self.start_minute, self.end_hour, self.end_minute
            )));
        }
        if self.slot_duration_minutes == 0 {
            return Err(invalid("slotDurationMinutes must be positive".to_string()));
        }
        let window = self.window_end_minute() - self.window_start_minute();
        if self.slot_duration_minutes > window {
            return Err(invalid(format!(
                "slotDurationMinutes {} exceeds the {}-minute working window",
                self.slot_duration_minutes, window
            )));
        }
        Ok(())
    }

    /// Whether `weekday` is one of the configured working days.
    pub fn works_on(&self, weekday: Weekday) -> bool {
        self.working_days
            .contains(&weekday.num_days_from_sunday())
    }

    /// Number of whole slots that fit in one working day.
    pub fn slots_per_day(&self) -> u32 {
        let window = self
            .window_end_minute()
            .saturating_sub(self.window_start_minute());
        window.checked_div(self.slot_duration_minutes).unwrap_or(0)
    }

    pub fn slot_duration(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.slot_duration_minutes))
    }

    /// Start of slot `index` on `day`.
    pub(crate) fn slot_start(&self, day: NaiveDate, index: u32) -> NaiveDateTime {
        let offset = self.window_start_minute() + index * self.slot_duration_minutes;
        day.and_time(NaiveTime::MIN) + TimeDelta::minutes(i64::from(offset))
    }

    fn window_start_minute(&self) -> u32 {
        self.start_hour * 60 + self.start_minute
    }

    fn window_end_minute(&self) -> u32 {
        (self.end_hour * 60 + self.end_minute).min(MINUTES_PER_DAY)
    }
}

fn invalid(message: String) -> SlotError {
    SlotError::InvalidConfiguration(message)
}
