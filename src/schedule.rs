//! Deferred bot turns on a virtual clock.
//!
//! The session never sleeps. It schedules one task when a bot becomes the
//! acting player and the caller decides when time passes, either by
//! advancing the clock or by firing the task right away.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

/// A scheduled task and the virtual time it becomes due.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    pub id: TaskId,
    pub due: Duration,
}

/// Single-slot cancelable scheduler. Scheduling replaces any pending task.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    pending: Option<Deferred>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> Option<Deferred> {
        self.pending
    }

    pub fn schedule(&mut self, delay: Duration) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending = Some(Deferred {
            id,
            due: self.now + delay,
        });
        id
    }

    pub fn cancel(&mut self) -> Option<TaskId> {
        self.pending.take().map(|task| task.id)
    }

    /// Removes the pending task if it is due by `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Deferred> {
        let task = self.pending.filter(|task| task.due <= until)?;
        self.pending = None;
        self.now = self.now.max(task.due);
        Some(task)
    }

    /// Removes the pending task regardless of its due time.
    pub fn take(&mut self) -> Option<Deferred> {
        let task = self.pending.take()?;
        self.now = self.now.max(task.due);
        Some(task)
    }

    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_only_when_due() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(MS * 1500);
        assert_eq!(scheduler.pop_due(MS * 1000), None);
        let task = scheduler.pop_due(MS * 1500).unwrap();
        assert_eq!(task.id, id);
        assert_eq!(scheduler.now(), MS * 1500);
        assert_eq!(scheduler.pending(), None);
    }

    #[test]
    fn cancel_drops_pending_task() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(MS * 10);
        assert_eq!(scheduler.cancel(), Some(id));
        assert_eq!(scheduler.pop_due(MS * 100), None);
    }

    #[test]
    fn rescheduling_replaces_task() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(MS * 10);
        let second = scheduler.schedule(MS * 20);
        assert_eq!(scheduler.pending().map(|task| task.id), Some(second));
        assert_eq!(scheduler.pending().map(|task| task.due), Some(MS * 20));
    }

    #[test]
    fn take_moves_clock_forward() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(MS * 700);
        assert!(scheduler.take().is_some());
        assert_eq!(scheduler.now(), MS * 700);
        scheduler.settle(MS * 100);
        assert_eq!(scheduler.now(), MS * 700);
    }
}
