//! Tests for next-fire tick computation
//!
//! Critical invariants tested:
//! - Strict advance: the next fire tick is always after the current tick
//! - Constant spacing once the offset has been aligned
//! - Zero intervals are rejected, never scheduled

use proptest::prelude::*;
use scheduled_events_core::core::schedule::next_fire_tick_in_ticks;
use scheduled_events_core::core::time::{TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_YEAR};
use scheduled_events_core::{next_fire_tick, ScheduleError, TimeScale};

// ============================================================================
// Fixed Scenarios
// ============================================================================

#[test]
fn test_hourly_from_zero() {
    let t = TICKS_PER_HOUR;
    assert_eq!(next_fire_tick(0, 1, TimeScale::Hours, 0, TimeScale::Hours), Ok(t));
    assert_eq!(next_fire_tick(t, 1, TimeScale::Hours, 0, TimeScale::Hours), Ok(2 * t));
}

#[test]
fn test_mid_interval_rounds_up_to_next_boundary() {
    let next = next_fire_tick(TICKS_PER_DAY + 17, 1, TimeScale::Days, 0, TimeScale::Hours);
    assert_eq!(next, Ok(2 * TICKS_PER_DAY));
}

#[test]
fn test_zero_interval_rejected_for_every_scale() {
    for scale in TimeScale::ALL {
        assert_eq!(
            next_fire_tick(500, 0, scale, 3, TimeScale::Days),
            Err(ScheduleError::ZeroInterval)
        );
    }
}

#[test]
fn test_zero_ticks_per_unit_rejected() {
    // An interval expressed in a unit worth zero ticks has no effective length
    assert_eq!(next_fire_tick_in_ticks(0, 0, 0), Err(ScheduleError::ZeroInterval));
}

#[test]
fn test_offset_keeps_phase_across_years() {
    // Yearly, 10 days into the year
    let mut tick = 0;
    for year in 1..=3 {
        tick = next_fire_tick(tick, 1, TimeScale::Years, 10, TimeScale::Days).unwrap();
        assert_eq!(tick, year * TICKS_PER_YEAR + 10 * TICKS_PER_DAY);
    }
}

#[test]
fn test_offset_wider_than_interval_only_shifts_start() {
    // Every 2 hours, first firing after a 1 day offset
    let first = next_fire_tick(0, 2, TimeScale::Hours, 1, TimeScale::Days).unwrap();
    assert!(first > TICKS_PER_DAY);

    let second = next_fire_tick(first, 2, TimeScale::Hours, 1, TimeScale::Days).unwrap();
    assert_eq!(second - first, 2 * TICKS_PER_HOUR);
}

// ============================================================================
// Properties
// ============================================================================

fn scale() -> impl Strategy<Value = TimeScale> {
    prop::sample::select(TimeScale::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_next_fire_tick_strictly_advances(
        current in 0u64..10 * TICKS_PER_YEAR,
        interval in 1u32..500,
        interval_scale in scale(),
        offset in 0u32..500,
        offset_scale in scale(),
    ) {
        let next = next_fire_tick(current, interval, interval_scale, offset, offset_scale).unwrap();
        prop_assert!(next > current);
    }

    #[test]
    fn prop_feedback_sequence_has_constant_spacing(
        current in 0u64..10 * TICKS_PER_YEAR,
        interval in 1u32..100,
        interval_scale in scale(),
        offset in 0u32..100,
        offset_scale in scale(),
    ) {
        let spacing = interval_scale.ticks_per_unit() * u64::from(interval);
        let mut tick = next_fire_tick(current, interval, interval_scale, offset, offset_scale).unwrap();

        for _ in 0..5 {
            let next = next_fire_tick(tick, interval, interval_scale, offset, offset_scale).unwrap();
            prop_assert_eq!(next - tick, spacing);
            tick = next;
        }
    }

    #[test]
    fn prop_first_fire_respects_offset(
        interval in 1u32..50,
        interval_scale in scale(),
        offset in 0u32..50,
        offset_scale in scale(),
    ) {
        let offset_ticks = offset_scale.ticks_per_unit() * u64::from(offset);
        let next = next_fire_tick(0, interval, interval_scale, offset, offset_scale).unwrap();
        prop_assert!(next > offset_ticks);
    }
}
