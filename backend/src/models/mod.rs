//! Domain models for the event scheduler

pub mod config;
pub mod event;
pub mod target;

// Re-exports
pub use config::{ConfigId, EventConfig, SelectionPolicy};
pub use event::{Event, EventLog};
pub use target::{Target, TargetScope};
