//! # Scheduling
//!
//! A virtual clock with delayed continuations.
//!
//! Time only moves when the owner advances it. Tasks come out in due-time
//! order, and tasks due at the same instant come out in the order they were
//! scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A task waiting for its due time.
#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    due: f64,
    sequence: u64,
    task: T,
}

impl<T> PartialEq for ScheduledTask<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.sequence == other.sequence
    }
}

impl<T> Eq for ScheduledTask<T> {}

impl<T> PartialOrd for ScheduledTask<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ScheduledTask<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior in BinaryHeap
        other
            .due
            .partial_cmp(&self.due)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Delayed continuations keyed on a virtual clock.
///
/// # Examples
///
/// ```
/// use hedgerow::Scheduler;
///
/// let mut scheduler = Scheduler::new();
/// scheduler.schedule(0.1, "second");
/// scheduler.schedule(0.05, "first");
///
/// assert_eq!(scheduler.pop_due(0.2), Some("first"));
/// assert_eq!(scheduler.pop_due(0.2), Some("second"));
/// assert_eq!(scheduler.pop_due(0.2), None);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: f64,
    next_sequence: u64,
    queue: BinaryHeap<ScheduledTask<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_sequence: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Runs `task` once `delay` has elapsed. Negative delays count as zero.
    pub fn schedule(&mut self, delay: f32, task: T) {
        let due = self.now + f64::from(delay.max(0.0));
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(ScheduledTask {
            due,
            sequence,
            task,
        });
    }

    /// Removes the earliest task due at or before `until`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until: f64) -> Option<T> {
        if self.queue.peek()?.due > until {
            return None;
        }
        let next = self.queue.pop()?;
        self.now = self.now.max(next.due);
        Some(next.task)
    }

    /// Moves the clock forward to `until` without running anything.
    pub fn advance_clock(&mut self, until: f64) {
        self.now = self.now.max(until);
    }

    /// Due time of the next task.
    pub fn next_due(&self) -> Option<f64> {
        self.queue.peek().map(|t| t.due)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
