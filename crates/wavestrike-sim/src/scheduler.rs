//! Deadline-keyed queue of one-shot delayed actions.
//!
//! Replaces engine timer callbacks. Each tick the engine drains every action
//! whose deadline has passed; actions re-check their preconditions when they
//! fire, so a stale action (pickup already collected, wave already over)
//! simply does nothing.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hecs::Entity;

use wavestrike_core::enums::MovementPattern;
use wavestrike_core::types::Millis;

/// A delayed action.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledAction {
    /// Clear the field and announce the current wave.
    EnterIntermission,
    /// Make the given wave active.
    BeginWave { wave: u32 },
    /// Spawn one enemy of a staggered formation.
    SpawnEnemy {
        wave: u32,
        x: f64,
        pattern: MovementPattern,
    },
    /// Try to spawn this wave's first-aid pickup.
    SpawnPickup { wave: u32 },
    /// Remove a pickup if it is still uncollected.
    ExpirePickup { pickup: Entity },
}

impl ScheduledAction {
    /// Actions handled by the wave director rather than the spawner.
    pub fn is_wave_transition(&self) -> bool {
        matches!(
            self,
            ScheduledAction::EnterIntermission | ScheduledAction::BeginWave { .. }
        )
    }
}

#[derive(Debug)]
struct Entry {
    deadline: Millis,
    seq: u64,
    action: ScheduledAction,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed: BinaryHeap is a max-heap, we want earliest deadline first,
    // then insertion order for equal deadlines.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending delayed actions ordered by deadline.
#[derive(Debug, Default)]
pub struct Scheduler {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action to fire once the clock reaches `deadline`.
    pub fn schedule(&mut self, deadline: Millis, action: ScheduledAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            deadline,
            seq,
            action,
        });
    }

    /// Remove and return every action due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Millis) -> Vec<ScheduledAction> {
        let mut due = Vec::new();
        while self.heap.peek().is_some_and(|e| e.deadline <= now) {
            if let Some(entry) = self.heap.pop() {
                due.push(entry.action);
            }
        }
        due
    }

    /// Earliest deadline of a pending action matching `pred`.
    pub fn next_deadline(&self, pred: impl Fn(&ScheduledAction) -> bool) -> Option<Millis> {
        self.heap
            .iter()
            .filter(|e| pred(&e.action))
            .map(|e| e.deadline)
            .min()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(300, ScheduledAction::SpawnPickup { wave: 3 });
        s.schedule(100, ScheduledAction::SpawnPickup { wave: 1 });
        s.schedule(200, ScheduledAction::SpawnPickup { wave: 2 });

        let due = s.drain_due(250);
        assert_eq!(
            due,
            vec![
                ScheduledAction::SpawnPickup { wave: 1 },
                ScheduledAction::SpawnPickup { wave: 2 },
            ]
        );
        assert_eq!(s.len(), 1);
        assert!(s.drain_due(299).is_empty());
        assert_eq!(s.drain_due(300).len(), 1);
        assert!(s.is_empty());
    }

    #[test]
    fn test_equal_deadlines_keep_insertion_order() {
        let mut s = Scheduler::new();
        for wave in 0..5 {
            s.schedule(1000, ScheduledAction::BeginWave { wave });
        }
        let waves: Vec<u32> = s
            .drain_due(1000)
            .into_iter()
            .map(|a| match a {
                ScheduledAction::BeginWave { wave } => wave,
                other => panic!("unexpected action {other:?}"),
            })
            .collect();
        assert_eq!(waves, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_next_deadline_filters() {
        let mut s = Scheduler::new();
        s.schedule(500, ScheduledAction::SpawnPickup { wave: 1 });
        s.schedule(900, ScheduledAction::BeginWave { wave: 1 });
        assert_eq!(s.next_deadline(|a| a.is_wave_transition()), Some(900));
        assert_eq!(s.next_deadline(|_| true), Some(500));
        s.clear();
        assert_eq!(s.next_deadline(|_| true), None);
    }
}
