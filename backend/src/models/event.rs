//! Event logging for scheduler auditing.
//!
//! Every scheduling decision the scheduler makes is recorded as an [`Event`].
//! The log lets a host (or a test) answer "what fired, when, against whom,
//! and why was something skipped" without scraping diagnostic output.
//!
//! # Event Types
//!
//! Events are categorized by scheduler phase:
//! - **Reload**: pending queue rebuilt, configs scheduled or rejected
//! - **Firing**: a due config fired, was skipped, or found nothing to target
//! - **Dispatch**: a (incident, target) pair was queued, rejected or executed
//!
//! # Example
//!
//! ```rust
//! use scheduled_events_core::models::Event;
//!
//! let event = Event::DispatchEnqueued {
//!     tick: 2_500,
//!     incident: "Eclipse".to_string(),
//!     target: "world:world".to_string(),
//! };
//!
//! assert_eq!(event.tick(), 2_500);
//! assert_eq!(event.event_type(), "DispatchEnqueued");
//! ```

use crate::models::config::ConfigId;

/// Scheduler event capturing one decision.
///
/// All events include the tick at which they were recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pending queue rebuilt from the config store
    Reloaded {
        tick: u64,
        scheduled: usize,
        rejected: usize,
    },

    /// Config placed in the pending queue
    Scheduled {
        tick: u64,
        config_id: ConfigId,
        incident: String,
        fire_tick: u64,
    },

    /// Config could not be scheduled (invalid interval)
    ConfigRejected {
        tick: u64,
        config_id: ConfigId,
        incident: String,
        reason: String,
    },

    /// Due config fired; `next_fire_tick` is its successor, if any
    Fired {
        tick: u64,
        config_id: ConfigId,
        incident: String,
        next_fire_tick: Option<u64>,
    },

    /// Due entry dropped without firing (config disabled or removed)
    FiringSkipped {
        tick: u64,
        config_id: ConfigId,
        reason: String,
    },

    /// Incident name did not resolve to a definition
    DefinitionMissing { tick: u64, incident: String },

    /// Firing resolved zero targets
    NoEligibleTargets {
        tick: u64,
        config_id: ConfigId,
        incident: String,
    },

    /// Selected target queued for dispatch
    DispatchEnqueued {
        tick: u64,
        incident: String,
        target: String,
    },

    /// Target failed the host's eligibility check at dispatch time
    TargetRejected {
        tick: u64,
        incident: String,
        target: String,
    },

    /// Host executed the incident
    DispatchExecuted {
        tick: u64,
        incident: String,
        target: String,
        success: bool,
    },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> u64 {
        match self {
            Event::Reloaded { tick, .. } => *tick,
            Event::Scheduled { tick, .. } => *tick,
            Event::ConfigRejected { tick, .. } => *tick,
            Event::Fired { tick, .. } => *tick,
            Event::FiringSkipped { tick, .. } => *tick,
            Event::DefinitionMissing { tick, .. } => *tick,
            Event::NoEligibleTargets { tick, .. } => *tick,
            Event::DispatchEnqueued { tick, .. } => *tick,
            Event::TargetRejected { tick, .. } => *tick,
            Event::DispatchExecuted { tick, .. } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Reloaded { .. } => "Reloaded",
            Event::Scheduled { .. } => "Scheduled",
            Event::ConfigRejected { .. } => "ConfigRejected",
            Event::Fired { .. } => "Fired",
            Event::FiringSkipped { .. } => "FiringSkipped",
            Event::DefinitionMissing { .. } => "DefinitionMissing",
            Event::NoEligibleTargets { .. } => "NoEligibleTargets",
            Event::DispatchEnqueued { .. } => "DispatchEnqueued",
            Event::TargetRejected { .. } => "TargetRejected",
            Event::DispatchExecuted { .. } => "DispatchExecuted",
        }
    }

    /// Get incident name if event relates to a specific incident
    pub fn incident(&self) -> Option<&str> {
        match self {
            Event::Scheduled { incident, .. } => Some(incident),
            Event::ConfigRejected { incident, .. } => Some(incident),
            Event::Fired { incident, .. } => Some(incident),
            Event::DefinitionMissing { incident, .. } => Some(incident),
            Event::NoEligibleTargets { incident, .. } => Some(incident),
            Event::DispatchEnqueued { incident, .. } => Some(incident),
            Event::TargetRejected { incident, .. } => Some(incident),
            Event::DispatchExecuted { incident, .. } => Some(incident),
            Event::Reloaded { .. } | Event::FiringSkipped { .. } => None,
        }
    }

    /// Get config ID if event relates to a specific config
    pub fn config_id(&self) -> Option<ConfigId> {
        match self {
            Event::Scheduled { config_id, .. } => Some(*config_id),
            Event::ConfigRejected { config_id, .. } => Some(*config_id),
            Event::Fired { config_id, .. } => Some(*config_id),
            Event::FiringSkipped { config_id, .. } => Some(*config_id),
            Event::NoEligibleTargets { config_id, .. } => Some(*config_id),
            _ => None,
        }
    }
}

/// Event log for storing and querying scheduler events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: u64) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific incident
    pub fn events_for_incident(&self, incident: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.incident() == Some(incident))
            .collect()
    }

    /// Get events for a specific config
    pub fn events_for_config(&self, config_id: ConfigId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.config_id() == Some(config_id))
            .collect()
    }

    /// Hand all logged events to the caller, leaving the log empty
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
