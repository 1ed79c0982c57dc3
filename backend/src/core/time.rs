//! Time management for the scheduler
//!
//! The host simulation operates in discrete ticks. Human-facing intervals are
//! expressed in a [`TimeScale`] (hours, days, seasons, years) and converted to
//! ticks with a fixed ticks-per-unit constant.

use crate::host::Clock;
use serde::{Deserialize, Serialize};

/// Ticks in one in-game hour
pub const TICKS_PER_HOUR: u64 = 2_500;
/// Ticks in one in-game day (24 hours)
pub const TICKS_PER_DAY: u64 = TICKS_PER_HOUR * 24;
/// Ticks in one season (15 days)
pub const TICKS_PER_SEASON: u64 = TICKS_PER_DAY * 15;
/// Ticks in one year (4 seasons)
pub const TICKS_PER_YEAR: u64 = TICKS_PER_SEASON * 4;

/// Unit in which an interval or offset is authored
///
/// The set is closed: persisted settings refer to scales by [`TimeScale::id`].
///
/// # Example
/// ```
/// use scheduled_events_core::TimeScale;
///
/// assert_eq!(TimeScale::Days.ticks_per_unit(), 60_000);
/// assert_eq!(TimeScale::from_id(3), Some(TimeScale::Years));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeScale {
    #[default]
    Hours,
    Days,
    Seasons,
    Years,
}

impl TimeScale {
    /// All scales in persisted-id order
    pub const ALL: [TimeScale; 4] = [
        TimeScale::Hours,
        TimeScale::Days,
        TimeScale::Seasons,
        TimeScale::Years,
    ];

    /// Number of ticks in one unit of this scale
    pub fn ticks_per_unit(self) -> u64 {
        match self {
            TimeScale::Hours => TICKS_PER_HOUR,
            TimeScale::Days => TICKS_PER_DAY,
            TimeScale::Seasons => TICKS_PER_SEASON,
            TimeScale::Years => TICKS_PER_YEAR,
        }
    }

    /// Stable id used by the settings document
    pub fn id(self) -> i64 {
        match self {
            TimeScale::Hours => 0,
            TimeScale::Days => 1,
            TimeScale::Seasons => 2,
            TimeScale::Years => 3,
        }
    }

    /// Look up a scale by its persisted id
    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|scale| scale.id() == id)
    }

    /// Lowercase label for diagnostics
    pub fn label(self) -> &'static str {
        match self {
            TimeScale::Hours => "hours",
            TimeScale::Days => "days",
            TimeScale::Seasons => "seasons",
            TimeScale::Years => "years",
        }
    }
}

/// Render an absolute tick as `year Y, day D, hour H` (all 0-indexed)
///
/// Used for human-readable fire dates in debug diagnostics.
///
/// # Example
/// ```
/// use scheduled_events_core::core::time::{describe_tick, TICKS_PER_DAY, TICKS_PER_HOUR};
///
/// assert_eq!(describe_tick(TICKS_PER_DAY + 3 * TICKS_PER_HOUR), "year 0, day 1, hour 3");
/// ```
pub fn describe_tick(tick: u64) -> String {
    let year = tick / TICKS_PER_YEAR;
    let day = (tick % TICKS_PER_YEAR) / TICKS_PER_DAY;
    let hour = (tick % TICKS_PER_DAY) / TICKS_PER_HOUR;
    format!("year {}, day {}, hour {}", year, day, hour)
}

/// Manually advanced clock
///
/// Stands in for the host's tick counter in the CLI driver and in tests.
///
/// # Example
/// ```
/// use scheduled_events_core::{Clock, TimeManager};
///
/// let mut time = TimeManager::starting_at(100);
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 101);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeManager {
    /// Absolute ticks elapsed
    current_tick: u64,
}

impl TimeManager {
    /// Create a clock at tick 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at an arbitrary tick
    pub fn starting_at(tick: u64) -> Self {
        Self { current_tick: tick }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Jump forward to `tick`; earlier ticks are ignored so the clock never runs backwards
    pub fn advance_to(&mut self, tick: u64) {
        self.current_tick = self.current_tick.max(tick);
    }
}

impl Clock for TimeManager {
    fn current_tick(&self) -> u64 {
        self.current_tick
    }
}
