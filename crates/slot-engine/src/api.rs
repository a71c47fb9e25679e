//! Typed request/response for the booking surface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::slot::{available_dates, Slot};

/// Longest range a single request may scan.
pub const MAX_RANGE_DAYS: i64 = 366;

/// Slots wanted for one calendar over a range of days (inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub calendar_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Return busy slots flagged `available: false` instead of omitting them.
    #[serde(default)]
    pub include_busy: bool,
}

impl AvailabilityRequest {
    pub fn new(calendar_id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            start_date,
            end_date,
            include_busy: false,
        }
    }

    /// A reversed range is valid (it yields no slots); an oversized one is not.
    pub fn validate(&self) -> Result<()> {
        if self.calendar_id.trim().is_empty() {
            return Err(SlotError::InvalidRequest("calendarId is empty".to_string()));
        }
        let span = (self.end_date - self.start_date).num_days();
        if span >= MAX_RANGE_DAYS {
            return Err(SlotError::InvalidRequest(format!(
                "range of {} days exceeds the {}-day limit",
                span + 1,
                MAX_RANGE_DAYS
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub slots: Vec<Slot>,
    /// Days with at least one available slot.
    pub dates: Vec<NaiveDate>,
    /// IANA zone the slot timestamps are expressed in.
    pub timezone: String,
}

impl AvailabilityResponse {
    pub fn new(slots: Vec<Slot>, timezone: impl Into<String>) -> Self {
        let dates = available_dates(&slots);
        Self {
            slots,
            dates,
            timezone: timezone.into(),
        }
    }
}
