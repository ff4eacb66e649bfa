//! One-shot deferred tasks with cancellable handles.
//!
//! The desktop runs on a single event loop, so nothing here is threaded:
//! callers schedule a task for a deadline and the loop drains whatever is
//! due on each iteration via [`Scheduler::take_due`].

use std::time::Instant;

/// Opaque handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TaskHandle,
    deadline: Instant,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    // kept sorted by (deadline, handle) so draining is a prefix split
    queue: Vec<Scheduled<T>>,
    next_handle: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn schedule(&mut self, deadline: Instant, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        let idx = self
            .queue
            .partition_point(|entry| (entry.deadline, entry.handle) <= (deadline, handle));
        self.queue.insert(
            idx,
            Scheduled {
                handle,
                deadline,
                task,
            },
        );
        handle
    }

    /// Cancel a pending task. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if let Some(idx) = self.queue.iter().position(|entry| entry.handle == handle) {
            self.queue.remove(idx);
            true
        } else {
            false
        }
    }

    /// Remove and return every task whose deadline is at or before `now`,
    /// earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TaskHandle, T)> {
        let split = self.queue.partition_point(|entry| entry.deadline <= now);
        self.queue
            .drain(..split)
            .map(|entry| (entry.handle, entry.task))
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.first().map(|entry| entry.deadline)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn due_tasks_fire_once_in_deadline_order() {
        let start = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(start + Duration::from_millis(30), "late");
        s.schedule(start + Duration::from_millis(10), "early");
        s.schedule(start + Duration::from_millis(90), "later");

        assert!(s.take_due(start).is_empty());
        let due: Vec<_> = s
            .take_due(start + Duration::from_millis(30))
            .into_iter()
            .map(|(_, t)| t)
            .collect();
        assert_eq!(due, vec!["early", "late"]);
        // already fired
        assert!(s.take_due(start + Duration::from_millis(30)).is_empty());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let start = Instant::now();
        let mut s = Scheduler::new();
        let handle = s.schedule(start + Duration::from_millis(5), 1u8);
        assert_eq!(s.next_deadline(), Some(start + Duration::from_millis(5)));
        assert!(s.cancel(handle));
        assert!(!s.cancel(handle));
        assert!(s.take_due(start + Duration::from_secs(1)).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn equal_deadlines_keep_schedule_order() {
        let at = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(at, 'a');
        s.schedule(at, 'b');
        let order: Vec<char> = s.take_due(at).into_iter().map(|(_, t)| t).collect();
        assert_eq!(order, vec!['a', 'b']);
        assert_eq!(s.next_deadline(), None);
    }
}
