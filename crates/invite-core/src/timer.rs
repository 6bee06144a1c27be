//! Clock and timer abstractions.
//!
//! The browser front-end backs these with `Date.now()` and
//! `setTimeout`/`setInterval`; tests use [`ManualScheduler`], which runs
//! due tasks in order as virtual time is advanced.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

/// Cancelable reference to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

pub trait Scheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle;
    fn set_interval(&self, period: Duration, task: Box<dyn FnMut()>) -> TimerHandle;
    /// Cancelling an unknown or already-fired handle is a no-op.
    fn cancel(&self, handle: TimerHandle);
}

/// Wall-clock time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeating {
        period_ms: i64,
        run: Box<dyn FnMut()>,
    },
}

struct ManualState {
    now_ms: i64,
    next_id: u64,
    // (due, id) ordering gives FIFO among tasks due at the same instant
    queue: BTreeMap<(i64, u64), Task>,
    running: Option<u64>,
    running_cancelled: bool,
}

/// Deterministic virtual-time scheduler and clock.
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl ManualScheduler {
    pub fn new(start_ms: i64) -> Self {
        Self {
            state: RefCell::new(ManualState {
                now_ms: start_ms,
                next_id: 1,
                queue: BTreeMap::new(),
                running: None,
                running_cancelled: false,
            }),
        }
    }

    fn enqueue(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut st = self.state.borrow_mut();
        let id = st.next_id;
        st.next_id += 1;
        let due = st.now_ms + delay.as_millis() as i64;
        st.queue.insert((due, id), task);
        TimerHandle(id)
    }

    /// Number of tasks still queued.
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Advance virtual time, running every task that falls due on the way.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now_ms + by.as_millis() as i64;
        loop {
            let (key, task) = {
                let mut st = self.state.borrow_mut();
                let key = match st.queue.keys().next() {
                    Some(&key) if key.0 <= target => key,
                    _ => break,
                };
                let Some(task) = st.queue.remove(&key) else {
                    break;
                };
                st.now_ms = key.0;
                st.running = Some(key.1);
                st.running_cancelled = false;
                (key, task)
            };
            match task {
                Task::Once(run) => run(),
                Task::Repeating { period_ms, mut run } => {
                    run();
                    let mut st = self.state.borrow_mut();
                    if !st.running_cancelled {
                        st.queue
                            .insert((key.0 + period_ms, key.1), Task::Repeating { period_ms, run });
                    }
                }
            }
            self.state.borrow_mut().running = None;
        }
        let mut st = self.state.borrow_mut();
        st.now_ms = st.now_ms.max(target);
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
        self.enqueue(delay, Task::Once(task))
    }

    fn set_interval(&self, period: Duration, task: Box<dyn FnMut()>) -> TimerHandle {
        let period_ms = (period.as_millis() as i64).max(1);
        self.enqueue(
            Duration::from_millis(period_ms as u64),
            Task::Repeating {
                period_ms,
                run: task,
            },
        )
    }

    fn cancel(&self, handle: TimerHandle) {
        // Dropped outside the borrow; a task's captures may cancel other timers.
        let removed: Vec<Task> = {
            let mut st = self.state.borrow_mut();
            if st.running == Some(handle.0) {
                st.running_cancelled = true;
            }
            let keys: Vec<(i64, u64)> = st
                .queue
                .keys()
                .filter(|(_, id)| *id == handle.0)
                .copied()
                .collect();
            keys.into_iter().filter_map(|k| st.queue.remove(&k)).collect()
        };
        drop(removed);
    }
}

impl Clock for ManualScheduler {
    fn now_ms(&self) -> i64 {
        self.state.borrow().now_ms
    }
}

/// A clock frozen at one instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}
