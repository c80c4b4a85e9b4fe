//! # Edit History
//!
//! Bounded linear undo/redo over full snapshots of a document.
//!
//! ## Cursor Model
//! ```text
//!   entries:  [ s0 ][ s1 ][ s2 ][ s3 ]
//!                          ▲
//!                        cursor        undo ◄──   ──► redo
//!
//!   push(s4) with cursor at s2:
//!   entries:  [ s0 ][ s1 ][ s2 ][ s4 ]      s3 (redo branch) discarded
//!                                  ▲
//!
//!   push beyond capacity: oldest entry evicted, cursor stays on newest
//! ```
//!
//! Snapshots are owned clones. Mutating the live document after a push can
//! never reach a stored entry.

use crate::HISTORY_CAPACITY;

/// Linear undo/redo buffer holding at most `capacity` snapshots.
///
/// ## Invariants
/// - Never empty; `cursor < entries.len() <= capacity`
/// - `push` discards everything after the cursor
#[derive(Debug, Clone)]
pub struct EditHistory<T: Clone> {
    entries: Vec<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Clone> EditHistory<T> {
    /// Creates a history whose only entry is `initial`, with the default
    /// capacity of 30.
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, HISTORY_CAPACITY)
    }

    /// Creates a history with a custom capacity (at least 1).
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = Vec::with_capacity(capacity);
        entries.push(initial);
        EditHistory {
            entries,
            cursor: 0,
            capacity,
        }
    }

    /// Records a snapshot after the cursor, discarding any redo branch.
    pub fn push(&mut self, snapshot: &T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot.clone());

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back one entry. At the oldest entry nothing changes.
    pub fn undo(&mut self) -> &T {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Steps forward one entry. At the newest entry nothing changes.
    pub fn redo(&mut self) -> &T {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates entries from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Drops every entry and starts over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Composition, Placement};

    fn snapshot(history: &EditHistory<&'static str>) -> Vec<&'static str> {
        history.entries().copied().collect()
    }

    #[test]
    fn test_initial_state() {
        let mut history = EditHistory::new("empty");
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(*history.undo(), "empty");
    }

    #[test]
    fn test_push_truncates_redo_branch() {
        let mut history = EditHistory::new("initial");
        history.push(&"A");
        history.push(&"B");

        assert_eq!(*history.undo(), "A");
        history.push(&"C");

        assert!(!history.can_redo());
        assert_eq!(*history.redo(), "C");
        assert_eq!(snapshot(&history), vec!["initial", "A", "C"]);
    }

    #[test]
    fn test_capacity_eviction() {
        let mut history = EditHistory::new(0);
        for i in 1..=35 {
            history.push(&i);
        }

        assert_eq!(history.len(), 30);
        assert_eq!(history.cursor(), 29);
        assert_eq!(*history.current(), 35);
        // 0..=5 evicted
        assert_eq!(history.entries().next(), Some(&6));
    }

    #[test]
    fn test_undo_all_the_way_back_after_eviction() {
        let mut history = EditHistory::with_capacity(0, 3);
        for i in 1..=5 {
            history.push(&i);
        }

        assert_eq!(*history.undo(), 4);
        assert_eq!(*history.undo(), 3);
        assert_eq!(*history.undo(), 3);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut live = Composition::new();
        let mut history = EditHistory::new(live.clone());

        live.placements.push(Placement::new("f1"));
        history.push(&live);
        live.placements.push(Placement::new("f2"));
        history.push(&live);

        live.placements[0].scale = 3.0;
        live.placements.clear();

        let restored = history.undo();
        assert_eq!(restored.placements.len(), 1);
        assert_eq!(restored.placements[0].flower_id, "f1");
        assert_eq!(restored.placements[0].scale, 1.0);
    }

    #[test]
    fn test_undo_redo_at_ends_are_noops() {
        let mut history = EditHistory::new("initial");
        history.push(&"A");

        assert_eq!(*history.redo(), "A");
        assert_eq!(history.cursor(), 1);

        history.undo();
        assert_eq!(*history.undo(), "initial");
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_reset() {
        let mut history = EditHistory::new(1);
        history.push(&2);
        history.reset(9);
        assert_eq!(history.len(), 1);
        assert_eq!(*history.current(), 9);
    }
}
