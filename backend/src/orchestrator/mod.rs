//! Orchestrator - main scheduler loop
//!
//! Implements the per-tick firing and dispatch cycle.
//!
//! See `engine.rs` for the tick loop and `dispatch.rs` for the hand-off to
//! the host's incident machinery.

pub mod dispatch;
pub mod engine;

// Re-export main types for convenience
pub use dispatch::{dispatch_entry, DispatchOutcome, DispatchReport};
pub use engine::{FiringMode, ReloadSummary, Scheduler, SchedulerConfig, TickResult};
