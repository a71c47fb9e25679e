//! # slot-engine
//!
//! Deterministic appointment availability for a practitioner's booking page.
//!
//! A weekly working-hours template is cut into fixed-length slots day by day;
//! slots in the past or overlapping busy calendar time are removed. The
//! calculator is pure: it takes the current time as an argument, performs no
//! I/O and no timezone conversion, and is safe to call from any thread.
//!
//! ## Modules
//!
//! - [`calculator`] - working hours + busy intervals → ordered slots
//! - [`config`] - `WorkingHoursConfig` template and its validation
//! - [`interval`] - busy intervals, half-open overlap, merging
//! - [`slot`] - `Slot` and helpers (group by day, next available, ...)
//! - [`zone`] - provider timestamps → practitioner wall clock
//! - [`google`] - Google Calendar `events.list` payload parsing
//! - [`service`] - availability workflow over an injected `BusySource`
//! - [`api`] - typed request/response for booking front ends
//! - [`error`] - Error types

pub mod api;
pub mod calculator;
pub mod config;
pub mod error;
pub mod google;
pub mod interval;
pub mod service;
pub mod slot;
pub mod zone;

pub use api::{AvailabilityRequest, AvailabilityResponse};
pub use calculator::{compute_available_slots, slot_grid};
pub use config::WorkingHoursConfig;
pub use error::SlotError;
pub use interval::BusyInterval;
pub use service::{AvailabilityService, BusySource, StaticBusySource};
pub use slot::Slot;
