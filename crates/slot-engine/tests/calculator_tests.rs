//! Tests for slot computation from working hours and busy intervals.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use slot_engine::calculator::{compute_available_slots, slot_grid};
use slot_engine::{BusyInterval, SlotError, WorkingHoursConfig};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap()
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
}

fn busy(date: NaiveDate, start: (u32, u32), end: (u32, u32)) -> BusyInterval {
    BusyInterval::new(at(date, start.0, start.1), at(date, end.0, end.1)).unwrap()
}

/// Monday 2026-03-16.
fn monday() -> NaiveDate {
    day(2026, 3, 16)
}

/// Midnight of the Sunday before [`monday`], before any generated slot.
fn early() -> NaiveDateTime {
    at(day(2026, 3, 15), 0, 0)
}

fn starts(slots: &[slot_engine::Slot]) -> Vec<NaiveDateTime> {
    slots.iter().map(|s| s.start).collect()
}

// ── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn evening_hours_with_one_busy_half_hour() {
    let config = WorkingHoursConfig::new([1, 2, 4, 5], 17, 20, 30);
    let busy = vec![busy(monday(), (18, 0), (18, 30))];

    let slots = compute_available_slots(&config, &busy, monday(), monday(), early()).unwrap();

    assert_eq!(slots.len(), 5);
    assert_eq!(
        starts(&slots),
        vec![
            at(monday(), 17, 0),
            at(monday(), 17, 30),
            at(monday(), 18, 30),
            at(monday(), 19, 0),
            at(monday(), 19, 30),
        ]
    );
    assert!(slots.iter().all(|s| s.available));
}

#[test]
fn one_hour_window_gives_two_half_hour_slots() {
    let config = WorkingHoursConfig::new([1], 9, 10, 30);

    let slots = compute_available_slots(&config, &[], monday(), monday(), early()).unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].start, at(monday(), 9, 0));
    assert_eq!(slots[0].end, at(monday(), 9, 30));
    assert_eq!(slots[1].start, at(monday(), 9, 30));
    assert_eq!(slots[1].end, at(monday(), 10, 0));
}

#[test]
fn reversed_range_is_empty_not_an_error() {
    let config = WorkingHoursConfig::default();

    let slots =
        compute_available_slots(&config, &[], day(2026, 3, 20), monday(), early()).unwrap();

    assert!(slots.is_empty());
}

// ── Overlap rules ───────────────────────────────────────────────────────────

#[test]
fn adjacent_busy_intervals_do_not_block() {
    // Busy 09:30-10:00 touches the 09:00 slot's end and the 10:00 slot's start.
    let config = WorkingHoursConfig::new([1], 9, 11, 30);
    let busy = vec![busy(monday(), (9, 30), (10, 0))];

    let slots = compute_available_slots(&config, &busy, monday(), monday(), early()).unwrap();

    assert_eq!(
        starts(&slots),
        vec![at(monday(), 9, 0), at(monday(), 10, 0), at(monday(), 10, 30)]
    );
}

#[test]
fn partial_overlap_blocks_the_slot() {
    let config = WorkingHoursConfig::new([1], 9, 11, 60);
    let busy = vec![busy(monday(), (9, 59), (10, 1))];

    let slots = compute_available_slots(&config, &busy, monday(), monday(), early()).unwrap();

    assert!(slots.is_empty(), "both slots touch the 09:59-10:01 interval");
}

#[test]
fn long_busy_interval_blocks_every_covered_slot() {
    let config = WorkingHoursConfig::new([1], 9, 13, 30);
    let busy = vec![busy(monday(), (9, 30), (12, 0))];

    let slots = compute_available_slots(&config, &busy, monday(), monday(), early()).unwrap();

    assert_eq!(
        starts(&slots),
        vec![at(monday(), 9, 0), at(monday(), 12, 0), at(monday(), 12, 30)]
    );
}

#[test]
fn busy_interval_across_midnight_blocks_both_days() {
    let config = WorkingHoursConfig::new([1, 2], 0, 24, 60);
    let tuesday = day(2026, 3, 17);
    let busy = vec![BusyInterval::new(at(monday(), 23, 0), at(tuesday, 1, 0)).unwrap()];

    let slots = compute_available_slots(&config, &busy, monday(), tuesday, early()).unwrap();

    assert_eq!(slots.len(), 46);
    assert!(!starts(&slots).contains(&at(monday(), 23, 0)));
    assert!(!starts(&slots).contains(&at(tuesday, 0, 0)));
    assert_eq!(slots.last().unwrap().end, at(day(2026, 3, 18), 0, 0));
}

#[test]
fn busy_outside_the_range_is_ignored() {
    let config = WorkingHoursConfig::new([1], 9, 10, 30);
    let busy = vec![
        busy(day(2026, 3, 9), (9, 0), (10, 0)),
        busy(day(2026, 3, 23), (9, 0), (10, 0)),
    ];

    let slots = compute_available_slots(&config, &busy, monday(), monday(), early()).unwrap();

    assert_eq!(slots.len(), 2);
}

#[test]
fn busy_input_order_does_not_matter() {
    let config = WorkingHoursConfig::new([1], 8, 18, 30);
    let mut intervals = vec![
        busy(monday(), (15, 0), (16, 0)),
        busy(monday(), (8, 0), (8, 45)),
        busy(monday(), (11, 10), (11, 20)),
        busy(monday(), (11, 0), (12, 0)),
    ];

    let forward = compute_available_slots(&config, &intervals, monday(), monday(), early()).unwrap();
    intervals.reverse();
    let backward =
        compute_available_slots(&config, &intervals, monday(), monday(), early()).unwrap();

    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 20 - 2 - 2 - 2);
}

// ── Day and time filters ────────────────────────────────────────────────────

#[test]
fn non_working_days_are_skipped() {
    // Mon/Tue/Thu/Fri over a full week.
    let config = WorkingHoursConfig::new([1, 2, 4, 5], 9, 10, 60);

    let slots =
        compute_available_slots(&config, &[], monday(), day(2026, 3, 22), early()).unwrap();

    let weekdays: Vec<Weekday> = slots.iter().map(|s| s.start.weekday()).collect();
    assert_eq!(
        weekdays,
        vec![Weekday::Mon, Weekday::Tue, Weekday::Thu, Weekday::Fri]
    );
}

#[test]
fn sunday_is_weekday_zero() {
    let config = WorkingHoursConfig::new([0], 9, 10, 60);

    let slots =
        compute_available_slots(&config, &[], monday(), day(2026, 3, 22), early()).unwrap();

    assert_eq!(starts(&slots), vec![at(day(2026, 3, 22), 9, 0)]);
}

#[test]
fn empty_working_days_yield_nothing() {
    let config = WorkingHoursConfig::new(std::iter::empty(), 9, 17, 30);

    let slots =
        compute_available_slots(&config, &[], monday(), day(2026, 4, 30), early()).unwrap();

    assert!(slots.is_empty());
}

#[test]
fn slots_starting_before_now_are_dropped() {
    let config = WorkingHoursConfig::new([1], 9, 12, 60);

    // 10:00 exactly is kept; 09:00 has already started.
    let slots =
        compute_available_slots(&config, &[], monday(), monday(), at(monday(), 10, 0)).unwrap();
    assert_eq!(starts(&slots), vec![at(monday(), 10, 0), at(monday(), 11, 0)]);

    let slots =
        compute_available_slots(&config, &[], monday(), monday(), at(monday(), 10, 1)).unwrap();
    assert_eq!(starts(&slots), vec![at(monday(), 11, 0)]);
}

#[test]
fn trailing_partial_slot_is_dropped() {
    let config = WorkingHoursConfig::new([1], 9, 10, 40);

    let slots = compute_available_slots(&config, &[], monday(), monday(), early()).unwrap();

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].end, at(monday(), 9, 40));
}

#[test]
fn minute_offsets_shift_the_window() {
    let mut config = WorkingHoursConfig::new([1], 8, 10, 45);
    config.start_minute = 30;
    config.end_minute = 15;

    let slots = compute_available_slots(&config, &[], monday(), monday(), early()).unwrap();

    assert_eq!(
        starts(&slots),
        vec![at(monday(), 8, 30), at(monday(), 9, 15)]
    );
    assert_eq!(slots[1].end, at(monday(), 10, 0));
}

// ── Flagged grid ────────────────────────────────────────────────────────────

#[test]
fn grid_flags_busy_slots_instead_of_dropping_them() {
    let config = WorkingHoursConfig::new([1, 2, 4, 5], 17, 20, 30);
    let busy = vec![busy(monday(), (18, 0), (18, 30))];

    let grid = slot_grid(&config, &busy, monday(), monday(), early()).unwrap();

    assert_eq!(grid.len(), 6);
    let flags: Vec<bool> = grid.iter().map(|s| s.available).collect();
    assert_eq!(flags, vec![true, true, false, true, true, true]);
}

#[test]
fn grid_still_drops_past_slots() {
    let config = WorkingHoursConfig::new([1], 9, 12, 60);

    let grid = slot_grid(&config, &[], monday(), monday(), at(monday(), 10, 30)).unwrap();

    assert_eq!(starts(&grid), vec![at(monday(), 11, 0)]);
}

// ── Failures ────────────────────────────────────────────────────────────────

#[test]
fn inverted_hours_fail_fast() {
    let config = WorkingHoursConfig::new([1], 17, 9, 30);

    let result = compute_available_slots(&config, &[], monday(), monday(), early());

    assert!(matches!(result, Err(SlotError::InvalidConfiguration(_))));
}

#[test]
fn invalid_config_fails_even_for_a_reversed_range() {
    let config = WorkingHoursConfig::new([1], 9, 10, 0);

    let result = compute_available_slots(&config, &[], day(2026, 3, 20), monday(), early());

    assert!(matches!(result, Err(SlotError::InvalidConfiguration(_))));
}

#[test]
fn malformed_busy_interval_is_rejected() {
    let config = WorkingHoursConfig::new([1], 9, 10, 30);
    // Bypass the constructor to model data that skipped validation.
    let inverted = BusyInterval {
        start: at(monday(), 10, 0),
        end: at(monday(), 9, 0),
    };

    let result = compute_available_slots(&config, &[inverted], monday(), monday(), early());

    assert!(matches!(result, Err(SlotError::MalformedInterval { .. })));
}

#[test]
fn zero_length_busy_interval_is_malformed() {
    let result = BusyInterval::new(at(monday(), 9, 0), at(monday(), 9, 0));

    assert!(matches!(result, Err(SlotError::MalformedInterval { .. })));
}
