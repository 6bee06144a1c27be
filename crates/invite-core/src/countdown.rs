//! Live countdown to a fixed wall-clock target.

use crate::constants::{COUNTDOWN_TICK_MS, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
use crate::error::TimestampError;
use crate::signal::Topic;
use crate::timer::{Clock, Scheduler, TimerHandle};
use chrono::NaiveDateTime;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeLeft {
    /// `None` once `target_ms` is not in the future.
    pub fn between(target_ms: i64, now_ms: i64) -> Option<TimeLeft> {
        let diff = target_ms.saturating_sub(now_ms);
        if diff <= 0 {
            return None;
        }
        Some(TimeLeft {
            days: (diff / MS_PER_DAY) as u64,
            hours: ((diff / MS_PER_HOUR) % 24) as u8,
            minutes: ((diff / MS_PER_MINUTE) % 60) as u8,
            seconds: ((diff / MS_PER_SECOND) % 60) as u8,
        })
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours as u64 * 3_600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    /// Days, hours, minutes, seconds, each left-padded to two digits.
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d, h, m, s] = self.padded();
        write!(f, "{}d {}h {}m {}s", d, h, m, s)
    }
}

/// Parse `YYYY-MM-DDTHH:MM:SS` as UTC milliseconds since the epoch.
pub fn parse_timestamp_ms(text: &str) -> Result<i64, TimestampError> {
    NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.and_utc().timestamp_millis())
        .map_err(|_| TimestampError(text.to_string()))
}

/// Recomputes [`TimeLeft`] at mount and on every tick; stops its interval
/// once the target has passed.
pub struct CountdownClock {
    target_ms: i64,
    current: Rc<Cell<Option<TimeLeft>>>,
    timer: Rc<Cell<Option<TimerHandle>>>,
    scheduler: Rc<dyn Scheduler>,
    updates: Topic<Option<TimeLeft>>,
}

impl CountdownClock {
    pub fn mount(target_ms: i64, clock: Rc<dyn Clock>, scheduler: Rc<dyn Scheduler>) -> Self {
        let current = Rc::new(Cell::new(TimeLeft::between(target_ms, clock.now_ms())));
        let timer: Rc<Cell<Option<TimerHandle>>> = Rc::new(Cell::new(None));
        let updates: Topic<Option<TimeLeft>> = Topic::new();

        if current.get().is_some() {
            let (cur, tmr, out, sched) = (
                current.clone(),
                timer.clone(),
                updates.clone(),
                scheduler.clone(),
            );
            let handle = scheduler.set_interval(
                Duration::from_millis(COUNTDOWN_TICK_MS),
                Box::new(move || {
                    let left = TimeLeft::between(target_ms, clock.now_ms());
                    cur.set(left);
                    out.publish(&left);
                    if left.is_none() {
                        if let Some(h) = tmr.take() {
                            sched.cancel(h);
                        }
                        log::info!("[countdown] target reached");
                    }
                }),
            );
            timer.set(Some(handle));
        } else {
            log::debug!("[countdown] target already passed at mount");
        }

        Self {
            target_ms,
            current,
            timer,
            scheduler,
            updates,
        }
    }

    pub fn target_ms(&self) -> i64 {
        self.target_ms
    }

    pub fn current(&self) -> Option<TimeLeft> {
        self.current.get()
    }

    pub fn is_finished(&self) -> bool {
        self.current.get().is_none()
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.get().is_some()
    }

    /// Fires after every tick with the fresh value.
    pub fn updates(&self) -> &Topic<Option<TimeLeft>> {
        &self.updates
    }

    pub fn unmount(&self) {
        if let Some(h) = self.timer.take() {
            self.scheduler.cancel(h);
        }
    }
}

impl Drop for CountdownClock {
    fn drop(&mut self) {
        self.unmount();
    }
}
