// Countdown decomposition and interval lifecycle under virtual time.

use invite_core::constants::{FULL_CELEBRATION_START, MS_PER_DAY, MS_PER_HOUR, WALIMA_START};
use invite_core::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const TARGET: i64 = 1_000 * MS_PER_DAY;

#[test]
fn decomposition_reassembles_to_whole_seconds() {
    for diff in [1_500i64, 59_999, 3_600_000, 90_061_000, 123_456_789, 9 * MS_PER_DAY + 7] {
        let left = TimeLeft::between(TARGET, TARGET - diff).unwrap();
        assert_eq!(left.total_seconds(), (diff / 1000) as u64);
        assert!(left.hours < 24);
        assert!(left.minutes < 60);
        assert!(left.seconds < 60);
    }
}

#[test]
fn known_difference_breaks_down_exactly() {
    let diff = 2 * MS_PER_DAY + 3 * MS_PER_HOUR + 4 * 60_000 + 5_000;
    let left = TimeLeft::between(TARGET, TARGET - diff).unwrap();
    assert_eq!(
        left,
        TimeLeft {
            days: 2,
            hours: 3,
            minutes: 4,
            seconds: 5
        }
    );
    assert_eq!(left.padded(), ["02", "03", "04", "05"].map(String::from));
    assert_eq!(left.to_string(), "02d 03h 04m 05s");
}

#[test]
fn finished_once_target_is_not_in_future() {
    assert_eq!(TimeLeft::between(TARGET, TARGET), None);
    assert_eq!(TimeLeft::between(TARGET, TARGET + 1), None);
    // under a second still counts as running
    assert_eq!(
        TimeLeft::between(TARGET, TARGET - 400),
        Some(TimeLeft {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0
        })
    );
}

#[test]
fn targets_parse_as_utc() {
    let full = parse_timestamp_ms(FULL_CELEBRATION_START).unwrap();
    let walima = parse_timestamp_ms(WALIMA_START).unwrap();
    assert_eq!(full, 1_770_076_800_000);
    assert_eq!(walima - full, 4 * MS_PER_DAY + 19 * MS_PER_HOUR);
    assert!(parse_timestamp_ms("next tuesday").is_err());
}

#[test]
fn value_is_available_at_mount_before_any_tick() {
    let sched = Rc::new(ManualScheduler::new(TARGET - 10 * MS_PER_HOUR));
    let clock = Rc::new(countdown_test_clock(&sched));
    let cd = CountdownClock::mount(TARGET, clock, sched.clone());
    assert_eq!(cd.current().map(|t| t.hours), Some(10));
    assert!(cd.is_ticking());
}

#[test]
fn interval_stops_itself_when_target_passes() {
    let sched = Rc::new(ManualScheduler::new(TARGET - 3_000));
    let clock = Rc::new(countdown_test_clock(&sched));
    let cd = CountdownClock::mount(TARGET, clock, sched.clone());

    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let _sub = cd.updates().subscribe(move |v| s.borrow_mut().push(v.map(|t| t.seconds)));

    sched.advance(Duration::from_secs(10));
    assert_eq!(*seen.borrow(), vec![Some(2), Some(1), None]);
    assert!(cd.is_finished());
    assert!(!cd.is_ticking());
    assert_eq!(sched.pending(), 0);
}

#[test]
fn already_passed_target_never_schedules() {
    let sched = Rc::new(ManualScheduler::new(TARGET + 5));
    let clock = Rc::new(countdown_test_clock(&sched));
    let cd = CountdownClock::mount(TARGET, clock, sched.clone());
    assert!(cd.is_finished());
    assert_eq!(sched.pending(), 0);
}

#[test]
fn unmount_cancels_the_tick() {
    let sched = Rc::new(ManualScheduler::new(0));
    let clock = Rc::new(countdown_test_clock(&sched));
    let cd = CountdownClock::mount(TARGET, clock, sched.clone());
    assert_eq!(sched.pending(), 1);
    drop(cd);
    assert_eq!(sched.pending(), 0);
}

/// Clock that follows the scheduler's virtual time.
struct SharedClock(Rc<ManualScheduler>);

impl Clock for SharedClock {
    fn now_ms(&self) -> i64 {
        self.0.now_ms()
    }
}

fn countdown_test_clock(sched: &Rc<ManualScheduler>) -> SharedClock {
    SharedClock(sched.clone())
}

#[test]
fn two_days_before_the_celebration() {
    let target = parse_timestamp_ms("2026-02-03T00:00:00").unwrap();
    let now = parse_timestamp_ms("2026-02-01T00:00:00").unwrap();
    assert_eq!(
        TimeLeft::between(target, now),
        Some(TimeLeft {
            days: 2,
            hours: 0,
            minutes: 0,
            seconds: 0
        })
    );
}

#[test]
fn far_future_target_does_not_overflow_into_finished() {
    let left = TimeLeft::between(i64::MAX, -10).unwrap();
    assert_eq!(left.days, (i64::MAX / MS_PER_DAY) as u64);
    assert!(left.hours < 24);
}
