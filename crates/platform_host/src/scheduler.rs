//! Deferred one-shot tasks on the UI thread.

use std::{cell::RefCell, rc::Rc};

/// A task run once after its delay elapses.
pub type DeferredTask = Box<dyn FnOnce()>;

/// Host timer service. Tasks run on the UI thread, never re-entrantly inside `schedule`.
pub trait TaskScheduler {
    /// Runs `task` after roughly `delay_ms` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error when the host timer rejects the task. The task is dropped.
    fn schedule(&self, delay_ms: u32, task: DeferredTask) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Scheduler that drops every task. Used on hosts without timers.
pub struct NoopScheduler;

impl TaskScheduler for NoopScheduler {
    fn schedule(&self, _delay_ms: u32, _task: DeferredTask) -> Result<(), String> {
        Ok(())
    }
}

struct QueuedTask {
    due_ms: u64,
    sequence: u64,
    task: DeferredTask,
}

#[derive(Default)]
struct ManualState {
    now_ms: u64,
    next_sequence: u64,
    queue: Vec<QueuedTask>,
}

#[derive(Clone, Default)]
/// Virtual-clock scheduler. Tasks run only when the clock is advanced.
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of tasks not yet run.
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Moves the clock forward by `delta_ms`, running due tasks in due-time then FIFO order.
    ///
    /// Tasks scheduled by a running task are also run if they fall due within the window.
    pub fn advance(&self, delta_ms: u64) {
        let target = self.state.borrow().now_ms + delta_ms;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, queued)| queued.due_ms <= target)
                    .min_by_key(|(_, queued)| (queued.due_ms, queued.sequence))
                    .map(|(index, _)| index);
                due.map(|index| {
                    let queued = state.queue.remove(index);
                    state.now_ms = state.now_ms.max(queued.due_ms);
                    queued.task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.state.borrow_mut().now_ms = target;
    }
}

impl TaskScheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: DeferredTask) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        let due_ms = state.now_ms + u64::from(delay_ms);
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.queue.push(QueuedTask {
            due_ms,
            sequence,
            task,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tasks_run_in_due_order_when_clock_advances() {
        let scheduler = ManualScheduler::default();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, label) in [(300, "late"), (50, "early"), (50, "early-second")] {
            let log = log.clone();
            scheduler
                .schedule(delay, Box::new(move || log.borrow_mut().push(label)))
                .expect("schedule");
        }

        scheduler.advance(49);
        assert!(log.borrow().is_empty());
        scheduler.advance(1);
        assert_eq!(*log.borrow(), vec!["early", "early-second"]);
        scheduler.advance(250);
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now_ms(), 300);
    }

    #[test]
    fn tasks_may_schedule_follow_ups() {
        let scheduler = ManualScheduler::default();
        let hits = Rc::new(RefCell::new(0));
        let inner_scheduler = scheduler.clone();
        let inner_hits = hits.clone();
        scheduler
            .schedule(
                10,
                Box::new(move || {
                    *inner_hits.borrow_mut() += 1;
                    let hits = inner_hits.clone();
                    inner_scheduler
                        .schedule(10, Box::new(move || *hits.borrow_mut() += 1))
                        .expect("schedule follow-up");
                }),
            )
            .expect("schedule");

        scheduler.advance(15);
        assert_eq!(*hits.borrow(), 1);
        scheduler.advance(5);
        assert_eq!(*hits.borrow(), 2);
    }
}
