//! Dispatch Queue - deferred incident execution
//!
//! Plain FIFO of resolved `(incident, target)` pairs. The scheduler drains
//! exactly one entry per tick, so a single firing that fans out to many
//! targets starts its incidents over consecutive ticks instead of all at once.

use crate::models::target::Target;
use std::collections::VecDeque;

/// One incident waiting to run against one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEntry {
    pub incident_name: String,
    pub target: Target,
}

/// FIFO of pending dispatches
#[derive(Debug, Clone, Default)]
pub struct DispatchQueue {
    entries: VecDeque<DispatchEntry>,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, entry: DispatchEntry) {
        self.entries.push_back(entry);
    }

    /// Take the oldest entry
    pub fn drain_one(&mut self) -> Option<DispatchEntry> {
        self.entries.pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &DispatchEntry> {
        self.entries.iter()
    }
}
