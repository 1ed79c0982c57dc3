//! Scheduler Engine
//!
//! Main tick loop tying the scheduler components together:
//! - Next-fire computation (interval/offset arithmetic)
//! - Pending queue (what fires next)
//! - Target resolution and selection
//! - Dispatch queue (one incident started per tick)
//! - Event logging (complete scheduling history)
//!
//! # Architecture
//!
//! ```text
//! For each host tick t:
//! 1. Read the clock
//! 2. For each due pending entry (all of them, or only the earliest):
//!    a. Pop it
//!    b. Skip it if its config was disabled or removed
//!    c. Reschedule it at its next fire tick
//!    d. Resolve the incident definition by name (skip firing if missing)
//!    e. Resolve targets, apply the selection policy, queue dispatches
//! 3. Drain exactly one dispatch and hand it to the host
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use scheduled_events_core::{ConfigStore, EventConfig, Scheduler, SchedulerConfig, TargetScope};
//!
//! let store = ConfigStore::from_configs(vec![EventConfig::new(TargetScope::Singleton, "Eclipse")]);
//! let mut scheduler = Scheduler::new(SchedulerConfig::default(), store);
//! scheduler.reload(host.current_tick());
//!
//! // Inside the host's per-tick callback
//! let result = scheduler.tick(&mut host);
//! println!("Tick {}: {} fired, {} queued", result.tick, result.num_fired, result.num_enqueued);
//! ```

use crate::core::time::describe_tick;
use crate::host::Host;
use crate::models::config::{ConfigId, EventConfig};
use crate::models::event::{Event, EventLog};
use crate::orchestrator::dispatch::{dispatch_entry, DispatchReport};
use crate::queue::{DispatchEntry, DispatchQueue, PendingEntry, PendingQueue};
use crate::rng::RngManager;
use crate::store::{ConfigStore, StoreError};
use crate::targets::resolve_targets;
use tracing::{debug, info, warn};

// ============================================================================
// Configuration Types
// ============================================================================

/// How many due entries fire in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FiringMode {
    /// Every entry due at the current tick fires
    ///
    /// Burst fan-out is still paced by the one-per-tick dispatch queue.
    #[default]
    AllDue,

    /// Only the earliest due entry fires; other due entries wait for later ticks
    ///
    /// Under bursts this can starve later-due entries.
    EarliestOnly,
}

/// Scheduler configuration
#[derive(Debug, Clone, Default)]
pub struct SchedulerConfig {
    /// Seed for the shared selection RNG
    pub rng_seed: u64,

    /// Due-entry processing per tick
    pub firing_mode: FiringMode,
}

/// Result of a single tick
#[derive(Debug, Clone)]
pub struct TickResult {
    /// Clock value the tick ran at
    pub tick: u64,

    /// Number of configs that fired this tick
    pub num_fired: usize,

    /// Number of dispatches queued this tick
    pub num_enqueued: usize,

    /// The dispatch drained this tick, if any
    pub dispatched: Option<DispatchReport>,
}

/// Result of rebuilding the pending queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Configs placed in the pending queue
    pub scheduled: usize,

    /// Enabled configs that could not be scheduled
    pub rejected: usize,
}

// ============================================================================
// Scheduler
// ============================================================================

/// Recurring-event scheduler for one simulation session
///
/// Owns the config store, both queues, the selection RNG and the event log.
/// Every mutation goes through `&mut self`, so a reload can never interleave
/// with a tick.
pub struct Scheduler {
    /// Recurring event configs
    store: ConfigStore,

    /// Upcoming firings, earliest first
    pending: PendingQueue,

    /// Resolved dispatches awaiting execution
    dispatch: DispatchQueue,

    /// Shared RNG for RANDOM_ONE selection
    rng: RngManager,

    firing_mode: FiringMode,

    /// Event log (all scheduling decisions)
    event_log: EventLog,
}

impl Scheduler {
    /// Create a scheduler over an existing config store
    ///
    /// Nothing is scheduled until [`Scheduler::reload`] runs with the
    /// host's current tick.
    pub fn new(config: SchedulerConfig, store: ConfigStore) -> Self {
        Self {
            store,
            pending: PendingQueue::new(),
            dispatch: DispatchQueue::new(),
            rng: RngManager::new(config.rng_seed),
            firing_mode: config.firing_mode,
            event_log: EventLog::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    pub fn dispatch_queue(&self) -> &DispatchQueue {
        &self.dispatch
    }

    pub fn firing_mode(&self) -> FiringMode {
        self.firing_mode
    }

    /// Get reference to event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Take all logged events, leaving the log empty
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.event_log.drain()
    }

    // ========================================================================
    // Config Mutation API
    // ========================================================================

    /// Replace every config and rebuild the pending queue
    pub fn reload_all(&mut self, configs: Vec<EventConfig>, current_tick: u64) -> ReloadSummary {
        self.store.replace(configs);
        self.reload(current_tick)
    }

    /// Add a config and rebuild the pending queue
    pub fn add_config(
        &mut self,
        config: EventConfig,
        current_tick: u64,
    ) -> Result<ConfigId, StoreError> {
        let id = self.store.add(config)?;
        self.reload(current_tick);
        Ok(id)
    }

    /// Remove a config and rebuild the pending queue
    pub fn remove_config(
        &mut self,
        id: ConfigId,
        current_tick: u64,
    ) -> Result<EventConfig, StoreError> {
        let removed = self.store.remove(id)?;
        self.reload(current_tick);
        Ok(removed)
    }

    /// Edit a config in place and rebuild the pending queue
    pub fn update_config<F>(
        &mut self,
        id: ConfigId,
        edit: F,
        current_tick: u64,
    ) -> Result<(), StoreError>
    where
        F: FnOnce(&mut EventConfig),
    {
        self.store.update(id, edit)?;
        self.reload(current_tick);
        Ok(())
    }

    /// Rebuild the pending queue from the store
    ///
    /// Clears the queue, then schedules every enabled config at its first
    /// fire tick after `current_tick`. Configs whose schedule cannot be
    /// computed are skipped with a diagnostic. Queued dispatches are kept.
    pub fn reload(&mut self, current_tick: u64) -> ReloadSummary {
        debug!("Loading scheduled events...");
        self.pending.clear();

        let mut summary = ReloadSummary::default();
        for config in self.store.iter().filter(|config| config.enabled) {
            match config.next_fire_tick(current_tick) {
                Ok(fire_tick) => {
                    debug!(
                        "Event {} will happen on {}",
                        config.incident_name,
                        describe_tick(fire_tick)
                    );
                    self.pending.insert(fire_tick, config.id);
                    self.event_log.log(Event::Scheduled {
                        tick: current_tick,
                        config_id: config.id,
                        incident: config.incident_name.clone(),
                        fire_tick,
                    });
                    summary.scheduled += 1;
                }
                Err(err) => {
                    warn!("{} event has invalid next tick: {}", config.incident_name, err);
                    self.event_log.log(Event::ConfigRejected {
                        tick: current_tick,
                        config_id: config.id,
                        incident: config.incident_name.clone(),
                        reason: err.to_string(),
                    });
                    summary.rejected += 1;
                }
            }
        }

        info!(
            "Scheduled {} events ({} rejected) at tick {}",
            summary.scheduled, summary.rejected, current_tick
        );
        self.event_log.log(Event::Reloaded {
            tick: current_tick,
            scheduled: summary.scheduled,
            rejected: summary.rejected,
        });
        summary
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one scheduler tick against the host
    ///
    /// Fires due configs (per [`FiringMode`]), then drains exactly one
    /// queued dispatch.
    pub fn tick<H>(&mut self, host: &mut H) -> TickResult
    where
        H: Host + ?Sized,
    {
        let current_tick = host.current_tick();
        let mut num_fired = 0;
        let mut num_enqueued = 0;

        while let Some(entry) = self.pending.peek_due(current_tick).copied() {
            if let Some(enqueued) = self.fire(entry, current_tick, host) {
                num_fired += 1;
                num_enqueued += enqueued;
            }
            if self.firing_mode == FiringMode::EarliestOnly {
                break;
            }
        }

        let dispatched = self
            .dispatch
            .drain_one()
            .map(|entry| dispatch_entry(entry, current_tick, host, &mut self.event_log));

        TickResult {
            tick: current_tick,
            num_fired,
            num_enqueued,
            dispatched,
        }
    }

    /// Fire one due entry; returns the number of dispatches queued, or
    /// `None` when the entry was dropped without firing
    fn fire<H>(&mut self, entry: PendingEntry, current_tick: u64, host: &H) -> Option<usize>
    where
        H: Host + ?Sized,
    {
        self.pending.pop(&entry);

        let Some(config) = self.store.get(entry.config_id).cloned() else {
            self.skip(entry.config_id, current_tick, "config no longer exists");
            return None;
        };
        if !config.enabled {
            self.skip(entry.config_id, current_tick, "config is disabled");
            return None;
        }

        debug!("Firing scheduled {} event!", config.incident_name);

        // Reschedule before anything can go wrong with this firing
        let next_fire_tick = match config.next_fire_tick(current_tick) {
            Ok(next) => {
                debug!("Next event will happen on {}", describe_tick(next));
                self.pending.insert(next, config.id);
                Some(next)
            }
            Err(err) => {
                warn!("{} event has invalid next tick: {}", config.incident_name, err);
                None
            }
        };
        self.event_log.log(Event::Fired {
            tick: current_tick,
            config_id: config.id,
            incident: config.incident_name.clone(),
            next_fire_tick,
        });

        if host.resolve(&config.incident_name).is_none() {
            warn!(
                "Could not fire event {}, since it could not find an incident definition",
                config.incident_name
            );
            self.event_log.log(Event::DefinitionMissing {
                tick: current_tick,
                incident: config.incident_name.clone(),
            });
            return Some(0);
        }

        let targets = resolve_targets(config.target_scope, host);
        if targets.is_empty() {
            debug!("Event {} found 0 targets", config.incident_name);
            self.event_log.log(Event::NoEligibleTargets {
                tick: current_tick,
                config_id: config.id,
                incident: config.incident_name.clone(),
            });
            return Some(0);
        }

        let incident = &config.incident_name;
        let queue = &mut self.dispatch;
        let event_log = &mut self.event_log;
        let enqueued = config
            .effective_policy()
            .apply(&targets, &mut self.rng, |target| {
                event_log.log(Event::DispatchEnqueued {
                    tick: current_tick,
                    incident: incident.clone(),
                    target: target.to_string(),
                });
                queue.enqueue(DispatchEntry {
                    incident_name: incident.clone(),
                    target: target.clone(),
                });
            });

        Some(enqueued)
    }

    fn skip(&mut self, config_id: ConfigId, current_tick: u64, reason: &str) {
        debug!("Dropping pending entry for {}: {}", config_id, reason);
        self.event_log.log(Event::FiringSkipped {
            tick: current_tick,
            config_id,
            reason: reason.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::TICKS_PER_HOUR;
    use crate::host::{Clock, DefinitionRegistry, IncidentDefinition, IncidentDispatcher, TargetSource};
    use crate::models::target::{Target, TargetScope};
    use crate::TimeScale;

    /// Host where every name resolves and every execution is counted
    #[derive(Default)]
    struct CountingHost {
        tick: u64,
        executed: usize,
    }

    impl Clock for CountingHost {
        fn current_tick(&self) -> u64 {
            self.tick
        }
    }

    impl DefinitionRegistry for CountingHost {
        fn resolve(&self, name: &str) -> Option<IncidentDefinition> {
            Some(IncidentDefinition::new(name))
        }
    }

    impl TargetSource for CountingHost {
        fn local_regions(&self) -> Vec<Target> {
            Vec::new()
        }

        fn global_target(&self) -> Target {
            Target::world()
        }

        fn mobile_groups(&self) -> Vec<Target> {
            Vec::new()
        }
    }

    impl IncidentDispatcher for CountingHost {
        type Params = ();

        fn is_target_eligible(&self, _definition: &IncidentDefinition, _target: &Target) -> bool {
            true
        }

        fn build_parameters(&mut self, _definition: &IncidentDefinition, _target: &Target) -> Self::Params {}

        fn execute(&mut self, _definition: &IncidentDefinition, _params: ()) -> bool {
            self.executed += 1;
            true
        }
    }

    fn scheduled_hourly() -> (Scheduler, ConfigId) {
        let config = EventConfig::new(TargetScope::Singleton, "Eclipse")
            .with_interval(1, TimeScale::Hours);
        let id = config.id;
        let mut scheduler = Scheduler::new(
            SchedulerConfig::default(),
            ConfigStore::from_configs(vec![config]),
        );
        scheduler.reload(0);
        (scheduler, id)
    }

    #[test]
    fn test_config_disabled_without_reload_is_dropped_at_firing() {
        let (mut scheduler, id) = scheduled_hourly();
        scheduler
            .store
            .update(id, |config| config.enabled = false)
            .unwrap();

        let mut host = CountingHost {
            tick: TICKS_PER_HOUR,
            ..Default::default()
        };
        let result = scheduler.tick(&mut host);

        assert_eq!(result.num_fired, 0);
        assert_eq!(result.num_enqueued, 0);
        assert!(result.dispatched.is_none());
        assert!(scheduler.pending().is_empty(), "disabled config must not be rescheduled");
        assert_eq!(host.executed, 0);

        let skipped = scheduler.event_log().events_of_type("FiringSkipped");
        assert_eq!(skipped.len(), 1);
        assert_eq!(
            skipped[0],
            &Event::FiringSkipped {
                tick: TICKS_PER_HOUR,
                config_id: id,
                reason: "config is disabled".to_string(),
            }
        );
        assert!(scheduler.event_log().events_of_type("Fired").is_empty());
    }

    #[test]
    fn test_config_removed_without_reload_is_dropped_at_firing() {
        let (mut scheduler, id) = scheduled_hourly();
        scheduler.store.remove(id).unwrap();

        let mut host = CountingHost {
            tick: TICKS_PER_HOUR,
            ..Default::default()
        };
        let result = scheduler.tick(&mut host);

        assert_eq!(result.num_fired, 0);
        assert!(scheduler.pending().is_empty());
        assert!(scheduler.dispatch_queue().is_empty());
        assert_eq!(host.executed, 0);

        let skipped = scheduler.event_log().events_for_config(id);
        assert!(matches!(
            skipped.last(),
            Some(Event::FiringSkipped { reason, .. }) if reason == "config no longer exists"
        ));
    }

    #[test]
    fn test_skipped_entry_does_not_block_later_entries() {
        let (mut scheduler, id) = scheduled_hourly();
        let other = scheduler
            .store
            .add(EventConfig::new(TargetScope::Singleton, "Flare").with_interval(1, TimeScale::Hours))
            .unwrap();
        scheduler.reload(0);
        scheduler.store.remove(id).unwrap();

        let mut host = CountingHost {
            tick: TICKS_PER_HOUR,
            ..Default::default()
        };
        let result = scheduler.tick(&mut host);

        assert_eq!(result.num_fired, 1);
        assert_eq!(host.executed, 1);
        assert_eq!(scheduler.pending().fire_tick_of(other), Some(2 * TICKS_PER_HOUR));
    }
}
