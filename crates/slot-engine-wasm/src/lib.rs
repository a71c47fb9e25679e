//! WASM bindings for slot-engine.
//!
//! Exposes slot computation and Google event parsing to the booking UI via
//! `wasm-bindgen`. All complex types are passed as JSON strings. Timestamps
//! crossing the boundary are local wall-clock strings ("2026-03-16T09:00:00")
//! in the practitioner's zone, days are "YYYY-MM-DD".
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use slot_engine::google::{busy_intervals, parse_events};
use slot_engine::zone::{parse_date, parse_timezone};
use slot_engine::{BusyInterval, Slot, WorkingHoursConfig};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotDto {
    start: String,
    end: String,
    available: bool,
    duration_minutes: i64,
}

impl From<&Slot> for SlotDto {
    fn from(s: &Slot) -> Self {
        Self {
            start: format_local(s.start),
            end: format_local(s.end),
            available: s.available,
            duration_minutes: s.duration_minutes(),
        }
    }
}

/// Busy interval as read from and written to JavaScript.
#[derive(Serialize, Deserialize)]
struct IntervalDto {
    start: String,
    end: String,
}

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn format_local(dt: NaiveDateTime) -> String {
    dt.format(LOCAL_FORMAT).to_string()
}

fn parse_local(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, LOCAL_FORMAT)
        .map_err(|e| format!("Invalid local datetime '{}': {}", s, e))
}

fn parse_busy_json(json: &str) -> Result<Vec<BusyInterval>, String> {
    let inputs: Vec<IntervalDto> =
        serde_json::from_str(json).map_err(|e| format!("Invalid busy JSON: {}", e))?;

    inputs
        .into_iter()
        .map(|input| {
            let start = parse_local(&input.start)?;
            let end = parse_local(&input.end)?;
            BusyInterval::new(start, end).map_err(|e| e.to_string())
        })
        .collect()
}

fn slots_to_json(slots: &[Slot]) -> Result<String, String> {
    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    serde_json::to_string(&dtos).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Plain-Rust implementations (testable off-wasm)
// ---------------------------------------------------------------------------

fn run_calculator(
    config_json: &str,
    busy_json: &str,
    range_start: &str,
    range_end: &str,
    now: &str,
    include_busy: bool,
) -> Result<String, String> {
    let config: WorkingHoursConfig =
        serde_json::from_str(config_json).map_err(|e| format!("Invalid config JSON: {}", e))?;
    let busy = parse_busy_json(busy_json)?;
    let start = parse_date(range_start).map_err(|e| e.to_string())?;
    let end = parse_date(range_end).map_err(|e| e.to_string())?;
    let now = parse_local(now)?;

    let slots = if include_busy {
        slot_engine::slot_grid(&config, &busy, start, end, now)
    } else {
        slot_engine::compute_available_slots(&config, &busy, start, end, now)
    }
    .map_err(|e| e.to_string())?;

    slots_to_json(&slots)
}

fn run_parse_google(response_json: &str, timezone: &str) -> Result<String, String> {
    let tz = parse_timezone(timezone).map_err(|e| e.to_string())?;
    let events = parse_events(response_json).map_err(|e| e.to_string())?;
    let busy = busy_intervals(&events, tz).map_err(|e| e.to_string())?;

    let dtos: Vec<IntervalDto> = busy
        .iter()
        .map(|b| IntervalDto {
            start: format_local(b.start),
            end: format_local(b.end),
        })
        .collect();
    serde_json::to_string(&dtos).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute available slots; busy slots are omitted.
///
/// - `config_json` -- working-hours object (`workingDays`, `startHour`, ...)
/// - `busy_json` -- array of `{start, end}` local datetimes
/// - `range_start`, `range_end` -- inclusive days, "YYYY-MM-DD"
/// - `now` -- current local datetime
///
/// Returns a JSON array of `{start, end, available, durationMinutes}`.
#[wasm_bindgen(js_name = "computeAvailableSlots")]
pub fn compute_available_slots(
    config_json: &str,
    busy_json: &str,
    range_start: &str,
    range_end: &str,
    now: &str,
) -> Result<String, JsValue> {
    run_calculator(config_json, busy_json, range_start, range_end, now, false)
        .map_err(|e| JsValue::from_str(&e))
}

/// Same arguments as `computeAvailableSlots`, but busy slots are returned with
/// `available: false`.
#[wasm_bindgen(js_name = "slotGrid")]
pub fn slot_grid(
    config_json: &str,
    busy_json: &str,
    range_start: &str,
    range_end: &str,
    now: &str,
) -> Result<String, JsValue> {
    run_calculator(config_json, busy_json, range_start, range_end, now, true)
        .map_err(|e| JsValue::from_str(&e))
}

/// Turn a Google Calendar `events.list` body into busy intervals in `timezone`.
///
/// Returns a JSON array of `{start, end}` local datetimes, ready to pass to
/// `computeAvailableSlots`.
#[wasm_bindgen(js_name = "parseGoogleEvents")]
pub fn parse_google_events(response_json: &str, timezone: &str) -> Result<String, JsValue> {
    run_parse_google(response_json, timezone).map_err(|e| JsValue::from_str(&e))
}
