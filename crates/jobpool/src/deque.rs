use std::collections::VecDeque;

use parking_lot::Mutex;

/// A Chase-Lev-style double-ended work queue: one owner pushes and pops at
/// the bottom (LIFO, favoring recency and cache locality for the thread
/// that produced the work), and any number of thieves steal from the top
/// (FIFO, minimizing contention with the owner).
///
/// The external contract (push/pop/steal semantics, exactly-once delivery,
/// `top <= bottom` at quiescence) matches the classic atomic-indices
/// protocol, but this implementation guards the whole ring with a single
/// lock rather than juggling atomic `top`/`bottom` indices directly: pop's
/// "last element" race against a concurrent steal collapses into one
/// critical section instead of a CAS retry loop, and `VecDeque` absorbs the
/// capacity growth a hand-rolled ring buffer would otherwise need to double
/// explicitly.
pub struct WorkStealingDeque<T> {
    inner: Mutex<VecDeque<T>>,
}

impl<T> WorkStealingDeque<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
        }
    }

    /// Owner-only. Pushes at the bottom.
    pub fn push(&self, item: T) {
        self.inner.lock().push_back(item);
    }

    /// Owner-only. Pops from the bottom (LIFO).
    pub fn pop(&self) -> Option<T> {
        self.inner.lock().pop_back()
    }

    /// Thief-side. Pops from the top (FIFO).
    pub fn steal(&self) -> Option<T> {
        self.inner.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<T> Default for WorkStealingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}
