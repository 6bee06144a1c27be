//! Timed intro sequence shown before the first page render.

use crate::constants::{LOADING_COMPLETE_AT_MS, LOADING_OPENING_AT_MS, LOADING_STATUS_INTERVAL_MS};
use crate::signal::Topic;
use crate::timer::{Scheduler, TimerHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub const LOADING_STATUS_INITIAL: &str = "Initializing Hearts...";
pub const LOADING_STATUS_MESSAGES: [&str; 4] = [
    "Synchronizing Heartbeats...",
    "Aligning Neural Networks...",
    "Loading Our Story...",
    "Welcome to Our Journey",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingStage {
    Pulsing,
    Opening,
    Complete,
}

impl LoadingStage {
    pub fn css_class(self) -> &'static str {
        match self {
            LoadingStage::Pulsing => "stage-pulsing",
            LoadingStage::Opening => "stage-opening",
            LoadingStage::Complete => "stage-complete",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingState {
    pub stage: LoadingStage,
    pub status: &'static str,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            stage: LoadingStage::Pulsing,
            status: LOADING_STATUS_INITIAL,
        }
    }
}

struct Timers {
    status: Cell<Option<TimerHandle>>,
    opening: Cell<Option<TimerHandle>>,
    complete: Cell<Option<TimerHandle>>,
}

impl Timers {
    fn cancel_all(&self, scheduler: &dyn Scheduler) {
        for slot in [&self.status, &self.opening, &self.complete] {
            if let Some(h) = slot.take() {
                scheduler.cancel(h);
            }
        }
    }
}

pub struct LoadingSequence {
    state: Rc<RefCell<LoadingState>>,
    timers: Rc<Timers>,
    scheduler: Rc<dyn Scheduler>,
    updates: Topic<LoadingState>,
}

impl LoadingSequence {
    /// Start the sequence; `on_complete` runs once, at the `Complete` stage.
    pub fn mount(scheduler: Rc<dyn Scheduler>, on_complete: Box<dyn FnOnce()>) -> Self {
        let state = Rc::new(RefCell::new(LoadingState::default()));
        let timers = Rc::new(Timers {
            status: Cell::new(None),
            opening: Cell::new(None),
            complete: Cell::new(None),
        });
        let updates: Topic<LoadingState> = Topic::new();

        let next_message = Rc::new(Cell::new(0usize));
        let (st, out, t, sched) = (
            state.clone(),
            updates.clone(),
            timers.clone(),
            scheduler.clone(),
        );
        let status = scheduler.set_interval(
            Duration::from_millis(LOADING_STATUS_INTERVAL_MS),
            Box::new(move || {
                let idx = next_message.get();
                let Some(&msg) = LOADING_STATUS_MESSAGES.get(idx) else {
                    return;
                };
                next_message.set(idx + 1);
                let snapshot = {
                    let mut s = st.borrow_mut();
                    s.status = msg;
                    *s
                };
                out.publish(&snapshot);
                if idx + 1 == LOADING_STATUS_MESSAGES.len() {
                    if let Some(h) = t.status.take() {
                        sched.cancel(h);
                    }
                }
            }),
        );
        timers.status.set(Some(status));

        let (st, out, t) = (state.clone(), updates.clone(), timers.clone());
        let opening = scheduler.set_timeout(
            Duration::from_millis(LOADING_OPENING_AT_MS),
            Box::new(move || {
                t.opening.set(None);
                let snapshot = {
                    let mut s = st.borrow_mut();
                    s.stage = LoadingStage::Opening;
                    *s
                };
                out.publish(&snapshot);
            }),
        );
        timers.opening.set(Some(opening));

        let (st, out, t, sched) = (
            state.clone(),
            updates.clone(),
            timers.clone(),
            scheduler.clone(),
        );
        let complete = scheduler.set_timeout(
            Duration::from_millis(LOADING_COMPLETE_AT_MS),
            Box::new(move || {
                t.complete.set(None);
                t.cancel_all(sched.as_ref());
                let snapshot = {
                    let mut s = st.borrow_mut();
                    s.stage = LoadingStage::Complete;
                    *s
                };
                out.publish(&snapshot);
                log::debug!("[loading] complete");
                on_complete();
            }),
        );
        timers.complete.set(Some(complete));

        Self {
            state,
            timers,
            scheduler,
            updates,
        }
    }

    pub fn state(&self) -> LoadingState {
        *self.state.borrow()
    }

    pub fn updates(&self) -> &Topic<LoadingState> {
        &self.updates
    }

    /// Cancel every pending timer; the completion callback will not run.
    pub fn unmount(&self) {
        self.timers.cancel_all(self.scheduler.as_ref());
    }
}

impl Drop for LoadingSequence {
    fn drop(&mut self) {
        self.unmount();
    }
}
