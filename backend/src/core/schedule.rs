//! Next-fire tick computation
//!
//! Converts an event's interval and offset into the next absolute tick on
//! which it should fire.
//!
//! # Algorithm
//!
//! ```text
//! interval_ticks = interval_scale.ticks_per_unit * interval      (must be > 0)
//! offset_ticks   = offset_scale.ticks_per_unit * offset
//! base           = max(current_tick, offset_ticks)
//! next           = base - base % interval_ticks + interval_ticks
//!                + offset_ticks % interval_ticks
//! ```
//!
//! # Critical Invariants
//!
//! 1. `next > current_tick` for every valid input (strict advance)
//! 2. Feeding each result back in yields constant spacing `interval_ticks`
//!    after the first call
//! 3. Integer arithmetic only; overflow is reported, never wrapped

use crate::core::time::TimeScale;
use thiserror::Error;

/// Why a schedule could not be computed
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("effective interval is zero ticks")]
    ZeroInterval,

    #[error("schedule arithmetic overflowed the tick counter")]
    Overflow,
}

/// Interval and offset of a recurring event, in authored units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub interval: u32,
    pub interval_scale: TimeScale,
    pub offset: u32,
    pub offset_scale: TimeScale,
}

impl Recurrence {
    /// Interval converted to ticks
    pub fn interval_ticks(&self) -> Result<u64, ScheduleError> {
        span_ticks(self.interval, self.interval_scale.ticks_per_unit())
    }

    /// Offset converted to ticks
    pub fn offset_ticks(&self) -> Result<u64, ScheduleError> {
        span_ticks(self.offset, self.offset_scale.ticks_per_unit())
    }

    /// Next tick strictly after `current_tick` on which this recurrence fires
    ///
    /// # Example
    /// ```
    /// use scheduled_events_core::core::schedule::Recurrence;
    /// use scheduled_events_core::TimeScale;
    ///
    /// let hourly = Recurrence {
    ///     interval: 1,
    ///     interval_scale: TimeScale::Hours,
    ///     offset: 0,
    ///     offset_scale: TimeScale::Hours,
    /// };
    /// assert_eq!(hourly.next_fire_tick(0), Ok(2_500));
    /// assert_eq!(hourly.next_fire_tick(2_500), Ok(5_000));
    /// ```
    pub fn next_fire_tick(&self, current_tick: u64) -> Result<u64, ScheduleError> {
        next_fire_tick_in_ticks(current_tick, self.interval_ticks()?, self.offset_ticks()?)
    }
}

/// Next fire tick from authored units
///
/// Convenience wrapper over [`Recurrence::next_fire_tick`].
pub fn next_fire_tick(
    current_tick: u64,
    interval: u32,
    interval_scale: TimeScale,
    offset: u32,
    offset_scale: TimeScale,
) -> Result<u64, ScheduleError> {
    Recurrence {
        interval,
        interval_scale,
        offset,
        offset_scale,
    }
    .next_fire_tick(current_tick)
}

/// Next fire tick from spans already converted to ticks
///
/// Returns [`ScheduleError::ZeroInterval`] when `interval_ticks == 0`.
pub fn next_fire_tick_in_ticks(
    current_tick: u64,
    interval_ticks: u64,
    offset_ticks: u64,
) -> Result<u64, ScheduleError> {
    if interval_ticks == 0 {
        return Err(ScheduleError::ZeroInterval);
    }

    let base = current_tick.max(offset_ticks);
    let aligned = base - base % interval_ticks;

    aligned
        .checked_add(interval_ticks)
        .and_then(|next| next.checked_add(offset_ticks % interval_ticks))
        .ok_or(ScheduleError::Overflow)
}

fn span_ticks(amount: u32, ticks_per_unit: u64) -> Result<u64, ScheduleError> {
    ticks_per_unit
        .checked_mul(u64::from(amount))
        .ok_or(ScheduleError::Overflow)
}
