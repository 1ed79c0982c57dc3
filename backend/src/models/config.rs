//! Recurring event configuration
//!
//! An [`EventConfig`] is the user-authored definition of a recurring event:
//! which incident to trigger, against which target scope, how often, and how
//! to pick among several candidate targets.
//!
//! Configs are validated lazily. A config with a zero interval can be created
//! and stored; it is rejected when the scheduler tries to compute its next
//! fire tick.

use crate::core::schedule::{Recurrence, ScheduleError};
use crate::core::time::TimeScale;
use crate::models::target::TargetScope;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a config, independent of its position in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigId(Uuid);

impl ConfigId {
    /// Fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConfigId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Rule for choosing which resolved targets receive a firing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// Every resolved target, in resolution order
    #[default]
    All,
    /// One target chosen uniformly at random
    RandomOne,
    /// The first target in resolution order
    First,
}

impl SelectionPolicy {
    pub const ALL: [SelectionPolicy; 3] = [
        SelectionPolicy::All,
        SelectionPolicy::RandomOne,
        SelectionPolicy::First,
    ];

    /// Stable id used by the settings document
    pub fn id(self) -> i64 {
        match self {
            SelectionPolicy::All => 0,
            SelectionPolicy::RandomOne => 1,
            SelectionPolicy::First => 2,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|policy| policy.id() == id)
    }
}

/// A recurring event definition
///
/// # Example
/// ```
/// use scheduled_events_core::{EventConfig, SelectionPolicy, TargetScope, TimeScale};
///
/// let raid = EventConfig::new(TargetScope::Local, "RaidEnemy")
///     .with_interval(3, TimeScale::Days)
///     .with_offset(12, TimeScale::Hours)
///     .with_policy(SelectionPolicy::RandomOne);
///
/// assert!(raid.enabled);
/// assert_eq!(raid.next_fire_tick(0), Ok(180_000 + 30_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventConfig {
    pub id: ConfigId,
    pub enabled: bool,
    pub target_scope: TargetScope,

    /// Late-bound incident identifier, resolved through the host registry
    pub incident_name: String,

    pub interval: u32,
    pub interval_scale: TimeScale,
    pub offset: u32,
    pub offset_scale: TimeScale,
    pub selection_policy: SelectionPolicy,
}

impl EventConfig {
    /// Enabled, hourly, no offset, every target
    pub fn new(target_scope: TargetScope, incident_name: impl Into<String>) -> Self {
        Self {
            id: ConfigId::new(),
            enabled: true,
            target_scope,
            incident_name: incident_name.into(),
            interval: 1,
            interval_scale: TimeScale::Hours,
            offset: 0,
            offset_scale: TimeScale::Hours,
            selection_policy: SelectionPolicy::All,
        }
    }

    pub fn with_interval(mut self, interval: u32, scale: TimeScale) -> Self {
        self.interval = interval;
        self.interval_scale = scale;
        self
    }

    pub fn with_offset(mut self, offset: u32, scale: TimeScale) -> Self {
        self.offset = offset;
        self.offset_scale = scale;
        self
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.selection_policy = policy;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn recurrence(&self) -> Recurrence {
        Recurrence {
            interval: self.interval,
            interval_scale: self.interval_scale,
            offset: self.offset,
            offset_scale: self.offset_scale,
        }
    }

    /// Next tick strictly after `current_tick` on which this event fires
    pub fn next_fire_tick(&self, current_tick: u64) -> Result<u64, ScheduleError> {
        self.recurrence().next_fire_tick(current_tick)
    }

    /// Policy actually applied at firing time
    ///
    /// Singleton scope always resolves to one target, so its configured policy is ignored.
    pub fn effective_policy(&self) -> SelectionPolicy {
        if self.target_scope.is_multi_target() {
            self.selection_policy
        } else {
            SelectionPolicy::All
        }
    }
}
