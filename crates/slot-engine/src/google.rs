//! Google Calendar `events.list` payloads → busy intervals.
//!
//! Only the fields that decide busy time are modelled. Cancelled events,
//! events marked transparent ("show as free") and all-day events are not busy.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SlotError};
use crate::interval::BusyInterval;
use crate::zone::{parse_datetime, to_local_interval};

/// One item of an `events.list` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transparency: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

/// Either a timed (`dateTime`) or an all-day (`date`) boundary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventsPayload {
    Response {
        #[serde(default)]
        items: Vec<GoogleEvent>,
    },
    Items(Vec<GoogleEvent>),
}

impl GoogleEvent {
    /// Whether this event occupies time on the calendar.
    pub fn blocks_time(&self) -> bool {
        self.status.as_deref() != Some("cancelled")
            && self.transparency.as_deref() != Some("transparent")
            && self.start.date_time.is_some()
            && self.end.date_time.is_some()
    }

    /// Absolute `[start, end)` of the event, or `None` when it does not block time.
    ///
    /// # Errors
    /// `InvalidDatetime` for unparseable timestamps, `MalformedInterval` when
    /// the end is not after the start.
    pub fn instants(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let (Some(start), Some(end)) = (&self.start.date_time, &self.end.date_time) else {
            return Ok(None);
        };
        if !self.blocks_time() {
            return Ok(None);
        }
        let (start, end) = (parse_datetime(start)?, parse_datetime(end)?);
        if end <= start {
            return Err(SlotError::MalformedInterval {
                start: start.naive_utc(),
                end: end.naive_utc(),
            });
        }
        Ok(Some((start, end)))
    }

    /// Busy interval in `tz` wall-clock time, or `None` when the event does not block time.
    ///
    /// # Errors
    /// Same as [`GoogleEvent::instants`].
    pub fn to_busy(&self, tz: Tz) -> Result<Option<BusyInterval>> {
        match self.instants()? {
            Some((start, end)) => to_local_interval(start, end, tz).map(Some),
            None => Ok(None),
        }
    }
}

/// Parse an `events.list` response body, or a bare JSON array of events.
pub fn parse_events(json: &str) -> Result<Vec<GoogleEvent>> {
    let payload: EventsPayload = serde_json::from_str(json)?;
    Ok(match payload {
        EventsPayload::Response { items } => items,
        EventsPayload::Items(items) => items,
    })
}

/// Busy intervals in `tz` for every event that blocks time.
pub fn busy_intervals(events: &[GoogleEvent], tz: Tz) -> Result<Vec<BusyInterval>> {
    let mut busy = Vec::with_capacity(events.len());
    for event in events {
        match event.to_busy(tz)? {
            Some(interval) => busy.push(interval),
            None => debug!(id = event.id.as_deref().unwrap_or("-"), "event does not block time"),
        }
    }
    Ok(busy)
}
