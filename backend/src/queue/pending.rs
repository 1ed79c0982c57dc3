//! Pending Queue - what fires next
//!
//! Ascending collection of `(fire_tick, config)` pairs. This is the single
//! source of truth for upcoming firings.
//!
//! # Critical Invariants
//!
//! 1. **Ordering**: entries are sorted by `fire_tick` ascending
//! 2. **Stability**: entries with equal `fire_tick` keep insertion order
//! 3. **Uniqueness**: at most one entry per config

use crate::models::config::ConfigId;

/// One scheduled firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEntry {
    pub fire_tick: u64,
    pub config_id: ConfigId,
}

/// Sorted queue of upcoming firings
///
/// # Example
/// ```
/// use scheduled_events_core::queue::PendingQueue;
/// use scheduled_events_core::ConfigId;
///
/// let mut queue = PendingQueue::new();
/// queue.insert(30, ConfigId::new());
/// queue.insert(10, ConfigId::new());
///
/// assert!(queue.peek_due(9).is_none());
/// assert_eq!(queue.peek_due(10).map(|e| e.fire_tick), Some(10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    entries: Vec<PendingEntry>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a firing, keeping ascending order
    ///
    /// The entry goes immediately before the first entry with a strictly
    /// greater tick, so ties keep insertion order. Any existing entry for the
    /// same config is replaced.
    pub fn insert(&mut self, fire_tick: u64, config_id: ConfigId) {
        self.entries.retain(|entry| entry.config_id != config_id);

        let index = self
            .entries
            .partition_point(|entry| entry.fire_tick <= fire_tick);
        self.entries.insert(
            index,
            PendingEntry {
                fire_tick,
                config_id,
            },
        );
    }

    /// Earliest entry, if it is due at `current_tick`
    pub fn peek_due(&self, current_tick: u64) -> Option<&PendingEntry> {
        self.entries
            .first()
            .filter(|entry| entry.fire_tick <= current_tick)
    }

    /// Remove a specific entry, returning it if it was present
    pub fn pop(&mut self, entry: &PendingEntry) -> Option<PendingEntry> {
        let index = self.entries.iter().position(|e| e == entry)?;
        Some(self.entries.remove(index))
    }

    /// Empty the queue
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in firing order
    pub fn iter(&self) -> impl Iterator<Item = &PendingEntry> {
        self.entries.iter()
    }

    /// Scheduled fire tick of a config, if it is queued
    pub fn fire_tick_of(&self, config_id: ConfigId) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.config_id == config_id)
            .map(|entry| entry.fire_tick)
    }
}
