//! Availability workflow with an injected calendar source.
//!
//! The service owns the practitioner's template and zone; busy time comes from a
//! [`BusySource`] handed in by the caller, so tests and front ends can swap the
//! calendar provider without touching the calculator.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::api::{AvailabilityRequest, AvailabilityResponse};
use crate::calculator::{compute_available_slots, slot_grid};
use crate::config::WorkingHoursConfig;
use crate::error::Result;
use crate::google::GoogleEvent;
use crate::interval::BusyInterval;
use crate::zone::{start_of_day_utc, to_local, to_local_interval};

/// Read side of a calendar provider.
///
/// Returns busy intervals for `calendar_id` intersecting `[from, to)`, already
/// expressed as wall-clock time in `tz`. Retries and rate limiting are the
/// implementor's concern.
pub trait BusySource {
    fn busy_between(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Vec<BusyInterval>>;
}

impl<F> BusySource for F
where
    F: Fn(&str, DateTime<Utc>, DateTime<Utc>, Tz) -> Result<Vec<BusyInterval>>,
{
    fn busy_between(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Vec<BusyInterval>> {
        self(calendar_id, from, to, tz)
    }
}

/// In-memory calendars keyed by id. Unknown ids have no busy time.
#[derive(Debug, Clone, Default)]
pub struct StaticBusySource {
    calendars: HashMap<String, Vec<GoogleEvent>>,
}

impl StaticBusySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(mut self, calendar_id: impl Into<String>, events: Vec<GoogleEvent>) -> Self {
        self.calendars.insert(calendar_id.into(), events);
        self
    }
}

impl BusySource for StaticBusySource {
    fn busy_between(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Vec<BusyInterval>> {
        let Some(events) = self.calendars.get(calendar_id) else {
            return Ok(Vec::new());
        };
        let mut busy = Vec::new();
        for event in events {
            let Some((start, end)) = event.instants()? else {
                continue;
            };
            if start < to && end > from {
                busy.push(to_local_interval(start, end, tz)?);
            }
        }
        Ok(busy)
    }
}

/// Computes availability for one practitioner.
#[derive(Debug, Clone)]
pub struct AvailabilityService<S> {
    source: S,
    config: WorkingHoursConfig,
    timezone: Tz,
}

impl<S: BusySource> AvailabilityService<S> {
    /// # Errors
    /// `InvalidConfiguration` if `config` fails validation.
    pub fn new(source: S, config: WorkingHoursConfig, timezone: Tz) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            timezone,
        })
    }

    pub fn config(&self) -> &WorkingHoursConfig {
        &self.config
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Validate `request`, fetch busy time for its days and compute slots.
    ///
    /// `now` is an absolute instant; it is converted to the practitioner's
    /// wall clock before slots in the past are dropped.
    pub fn available_slots(
        &self,
        request: &AvailabilityRequest,
        now: DateTime<Utc>,
    ) -> Result<AvailabilityResponse> {
        request.validate()?;
        let tz_name = self.timezone.name();

        if request.start_date > request.end_date {
            return Ok(AvailabilityResponse::new(Vec::new(), tz_name));
        }

        let from = start_of_day_utc(request.start_date, self.timezone);
        let to = match request.end_date.succ_opt() {
            Some(next) => start_of_day_utc(next, self.timezone),
            None => start_of_day_utc(request.end_date, self.timezone) + TimeDelta::days(1),
        };

        let busy = self
            .source
            .busy_between(&request.calendar_id, from, to, self.timezone)?;
        debug!(
            calendar_id = %request.calendar_id,
            %from,
            %to,
            busy = busy.len(),
            "fetched busy intervals"
        );

        let local_now = to_local(now, self.timezone);
        let slots = if request.include_busy {
            slot_grid(&self.config, &busy, request.start_date, request.end_date, local_now)?
        } else {
            compute_available_slots(
                &self.config,
                &busy,
                request.start_date,
                request.end_date,
                local_now,
            )?
        };

        info!(
            calendar_id = %request.calendar_id,
            start_date = %request.start_date,
            end_date = %request.end_date,
            slots = slots.len(),
            "availability computed"
        );

        Ok(AvailabilityResponse::new(slots, tz_name))
    }
}
