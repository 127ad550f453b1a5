use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::job::Job;

/// Wraps a [`Job`] with the ordering `BinaryHeap` needs to pop jobs in
/// (priority desc, created asc) order: higher `priority` wins; ties break
/// toward the earlier `created` timestamp so equal-priority jobs drain in
/// FIFO order.
struct PriorityEntry<T>(Job<T>);

impl<T> PartialEq for PriorityEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.priority == other.0.priority && self.0.created_at() == other.0.created_at()
    }
}

impl<T> Eq for PriorityEntry<T> {}

impl<T> PartialOrd for PriorityEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for PriorityEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.0.priority.cmp(&other.0.priority) {
            Ordering::Equal => other.0.created_at().cmp(&self.0.created_at()),
            ord => ord,
        }
    }
}

/// A fair priority max-heap of jobs, ordered per [`PriorityEntry`].
pub struct PriorityHeap<T> {
    heap: BinaryHeap<PriorityEntry<T>>,
}

impl<T> PriorityHeap<T> {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::new() }
    }

    pub fn push(&mut self, job: Job<T>) {
        self.heap.push(PriorityEntry(job));
    }

    pub fn pop(&mut self) -> Option<Job<T>> {
        self.heap.pop().map(|entry| entry.0)
    }

    pub fn peek(&self) -> Option<&Job<T>> {
        self.heap.peek().map(|entry| &entry.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for PriorityHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
