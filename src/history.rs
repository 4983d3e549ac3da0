//! Linear undo/redo over immutable snapshots.
//!
//! Snapshots live in an arena of `Arc`s and are never mutated after being
//! pushed. Committing after an undo drops the abandoned branch.

use std::fmt;
use std::sync::Arc;

pub struct History<T> {
    snapshots: Vec<Arc<T>>,
    index: usize,
}

impl<T: fmt::Debug> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("index", &self.index)
            .field("len", &self.snapshots.len())
            .finish()
    }
}

impl<T> History<T> {
    pub fn new(initial: T) -> Self {
        Self {
            snapshots: vec![Arc::new(initial)],
            index: 0,
        }
    }

    /// Truncates everything after the current index, then appends.
    pub fn commit(&mut self, snapshot: Arc<T>) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);
        self.index = self.snapshots.len() - 1;
    }

    pub fn undo(&mut self) -> Option<Arc<T>> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<Arc<T>> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn current(&self) -> Arc<T> {
        Arc::clone(&self.snapshots[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: the initial snapshot is never dropped.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshot(&self, position: usize) -> Option<&Arc<T>> {
        self.snapshots.get(position)
    }
}

impl<T: Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_single_snapshot() {
        let history: History<Vec<u32>> = History::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn commit_after_undo_truncates_future() {
        let mut history: History<Vec<u32>> = History::default();
        history.commit(Arc::new(vec![1]));
        history.commit(Arc::new(vec![1, 2]));
        assert_eq!(*history.undo().unwrap(), vec![1]);
        history.commit(Arc::new(vec![1, 3]));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(*history.current(), vec![1, 3]);
    }

    #[test]
    fn navigation_never_changes_snapshots() {
        let mut history: History<Vec<u32>> = History::default();
        history.commit(Arc::new(vec![9]));
        let before = Arc::clone(history.snapshot(1).unwrap());
        history.undo();
        history.redo();
        assert!(Arc::ptr_eq(&before, history.snapshot(1).unwrap()));
        assert!(history.redo().is_none());
    }
}
