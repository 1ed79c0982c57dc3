//! Scheduler Queues
//!
//! Two queues sit between the clock and the host:
//! - **PendingQueue**: configs ordered by their next fire tick
//! - **DispatchQueue**: resolved `(incident, target)` pairs, drained one per tick
//!
//! A firing moves a config from the front of the pending queue back into it
//! (at its next fire tick) and pushes zero or more entries onto the dispatch
//! queue.

pub mod dispatch;
pub mod pending;

// Re-export public API
pub use dispatch::{DispatchEntry, DispatchQueue};
pub use pending::{PendingEntry, PendingQueue};
