//! Scheduled Events Core - Rust Engine
//!
//! Recurring-event scheduler for discrete-time simulations: fires configured
//! incidents at computed future ticks, resolves and selects targets at fire
//! time, and paces execution through a one-per-tick dispatch queue.
//!
//! # Architecture
//!
//! - **core**: Time scales and next-fire tick arithmetic
//! - **models**: Domain types (EventConfig, Target, Event log)
//! - **queue**: Pending (by fire tick) and dispatch (FIFO) queues
//! - **targets**: Target resolution and selection policies
//! - **orchestrator**: Main scheduler loop
//! - **store**: Config store and mutation API backing
//! - **settings**: Persisted settings document
//! - **host**: Traits the host simulation implements
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Ticks are u64; next fire tick is always strictly after the current tick
//! 2. The pending queue is sorted, stable on ties, one entry per config
//! 3. A valid config is always rescheduled, whatever happens to its firing
//! 4. All randomness is deterministic (seeded RNG)

// Module declarations
pub mod core;
pub mod host;
pub mod models;
pub mod orchestrator;
pub mod queue;
pub mod rng;
pub mod settings;
pub mod store;
pub mod targets;

// Re-exports for convenience
pub use crate::core::schedule::{next_fire_tick, Recurrence, ScheduleError};
pub use crate::core::time::{TimeManager, TimeScale};
pub use host::{Clock, DefinitionRegistry, Host, IncidentDefinition, IncidentDispatcher, TargetSource};
pub use models::{
    config::{ConfigId, EventConfig, SelectionPolicy},
    event::{Event, EventLog},
    target::{Target, TargetScope},
};
pub use orchestrator::{
    DispatchOutcome, DispatchReport, FiringMode, ReloadSummary, Scheduler, SchedulerConfig,
    TickResult,
};
pub use queue::{DispatchEntry, DispatchQueue, PendingEntry, PendingQueue};
pub use rng::RngManager;
pub use settings::{DroppedEntry, Settings, SettingsError};
pub use store::{ConfigStore, StoreError};
