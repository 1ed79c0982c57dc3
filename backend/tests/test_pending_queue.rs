//! Tests for the pending queue
//!
//! Critical invariants tested:
//! - Ascending fire-tick order regardless of insertion order
//! - Stable order among equal fire ticks
//! - PeekDue never removes and never returns a future entry

use scheduled_events_core::{ConfigId, PendingQueue};

fn drain_due(queue: &mut PendingQueue, tick: u64) -> Vec<(u64, ConfigId)> {
    let mut drained = Vec::new();
    while let Some(entry) = queue.peek_due(tick).copied() {
        queue.pop(&entry);
        drained.push((entry.fire_tick, entry.config_id));
    }
    drained
}

#[test]
fn test_insert_sorts_and_keeps_ties_stable() {
    let ids: Vec<ConfigId> = (0..4).map(|_| ConfigId::new()).collect();
    let mut queue = PendingQueue::new();

    queue.insert(50, ids[0]);
    queue.insert(10, ids[1]);
    queue.insert(30, ids[2]);
    queue.insert(10, ids[3]);

    let drained = drain_due(&mut queue, 100);
    assert_eq!(
        drained,
        vec![(10, ids[1]), (10, ids[3]), (30, ids[2]), (50, ids[0])]
    );
    assert!(queue.is_empty());
}

#[test]
fn test_peek_due_respects_current_tick() {
    let mut queue = PendingQueue::new();
    queue.insert(20, ConfigId::new());

    assert!(queue.peek_due(19).is_none());
    assert_eq!(queue.peek_due(20).map(|e| e.fire_tick), Some(20));
    assert_eq!(queue.peek_due(25).map(|e| e.fire_tick), Some(20));

    // Peeking does not consume
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_peek_due_only_looks_at_earliest() {
    let mut queue = PendingQueue::new();
    queue.insert(5, ConfigId::new());
    queue.insert(6, ConfigId::new());

    let first = *queue.peek_due(10).unwrap();
    assert_eq!(first.fire_tick, 5);
    queue.pop(&first);
    assert_eq!(queue.peek_due(10).map(|e| e.fire_tick), Some(6));
}

#[test]
fn test_pop_removes_only_that_entry() {
    let a = ConfigId::new();
    let b = ConfigId::new();
    let mut queue = PendingQueue::new();
    queue.insert(10, a);
    queue.insert(10, b);

    let entry = *queue.iter().nth(1).unwrap();
    assert_eq!(queue.pop(&entry).map(|e| e.config_id), Some(b));
    assert_eq!(queue.fire_tick_of(a), Some(10));
    assert_eq!(queue.fire_tick_of(b), None);
}

#[test]
fn test_one_entry_per_config() {
    let id = ConfigId::new();
    let other = ConfigId::new();
    let mut queue = PendingQueue::new();

    queue.insert(10, id);
    queue.insert(20, other);
    queue.insert(30, id);

    let order: Vec<ConfigId> = queue.iter().map(|e| e.config_id).collect();
    assert_eq!(order, vec![other, id]);
}

#[test]
fn test_clear() {
    let mut queue = PendingQueue::new();
    queue.insert(1, ConfigId::new());
    queue.insert(2, ConfigId::new());

    queue.clear();
    assert!(queue.is_empty());
    assert!(queue.peek_due(u64::MAX).is_none());
}
