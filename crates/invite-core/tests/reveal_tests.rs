// Reveal activation rules, the software visibility evaluator and root margins.

use invite_core::*;
use std::cell::RefCell;
use std::rc::Rc;

fn entry(id: u32, is_intersecting: bool, ratio: f64) -> IntersectionEntry {
    IntersectionEntry {
        target: TargetId(id),
        is_intersecting,
        ratio,
    }
}

#[test]
fn activation_is_monotonic() {
    let mut c = RevealController::new(ObserverConfig::reveal());
    c.observe([TargetId(1), TargetId(2)]);

    let newly = c.handle(&[entry(1, true, 0.5)]);
    assert_eq!(newly.as_slice(), &[TargetId(1)]);
    assert!(c.is_activated(TargetId(1)));

    // leaving the viewport never clears the flag
    let newly = c.handle(&[entry(1, false, 0.0)]);
    assert!(newly.is_empty());
    assert!(c.is_activated(TargetId(1)));

    // a second crossing is not reported again
    assert!(c.handle(&[entry(1, true, 1.0)]).is_empty());
    assert_eq!(c.activated_count(), 1);
}

#[test]
fn below_threshold_or_not_intersecting_is_ignored() {
    let mut c = RevealController::new(ObserverConfig::reveal());
    c.observe([TargetId(1)]);
    assert!(c.handle(&[entry(1, true, 0.05)]).is_empty());
    assert!(c.handle(&[entry(1, false, 0.5)]).is_empty());
    assert!(!c.is_activated(TargetId(1)));
    // exactly at the threshold, as reported by the browser
    assert_eq!(c.handle(&[entry(1, true, 0.1 - 1e-9)]).len(), 1);
}

#[test]
fn unknown_targets_are_ignored() {
    let mut c = RevealController::new(ObserverConfig::reveal());
    c.observe([TargetId(1)]);
    assert!(c.handle(&[entry(7, true, 1.0)]).is_empty());
    assert!(!c.is_observed(TargetId(7)));
}

#[test]
fn mounted_reveal_publishes_each_activation_once() {
    let feed = IntersectionFeed::new();
    let mut controller = RevealController::new(ObserverConfig::reveal_early());
    controller.observe((0..3).map(TargetId));
    let mounted = MountedReveal::mount(controller, &feed);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let _sub = mounted.activations().subscribe(move |id| s.borrow_mut().push(*id));

    feed.publish(&vec![entry(0, true, 0.3), entry(2, true, 0.2)]);
    feed.publish(&vec![entry(0, true, 0.9), entry(1, false, 0.0)]);
    feed.publish(&vec![entry(1, true, 0.4)]);

    assert_eq!(*seen.borrow(), vec![TargetId(0), TargetId(2), TargetId(1)]);
    assert_eq!(mounted.activated_count(), 3);
}

#[test]
fn unmount_detaches_from_feed() {
    let feed = IntersectionFeed::new();
    let mut controller = RevealController::new(ObserverConfig::reveal());
    controller.observe([TargetId(0)]);
    let mounted = MountedReveal::mount(controller, &feed);
    assert_eq!(feed.listener_count(), 1);
    mounted.unmount();
    assert_eq!(feed.listener_count(), 0);
}

#[test]
fn evaluator_reports_only_state_changes() {
    let vp = ViewportSize::new(1000.0, 800.0);
    let mut ev = VisibilityEvaluator::new(ObserverConfig::reveal());

    // first evaluation reports everything
    let below = Rect::new(0.0, 900.0, 100.0, 100.0);
    assert_eq!(ev.evaluate(vp, &[(TargetId(0), below)]).len(), 1);
    assert!(ev.evaluate(vp, &[(TargetId(0), below)]).is_empty());

    // 50 of 100px visible
    let peeking = Rect::new(0.0, 750.0, 100.0, 100.0);
    let out = ev.evaluate(vp, &[(TargetId(0), peeking)]);
    assert_eq!(out.len(), 1);
    assert!(out[0].is_intersecting);
    assert!((out[0].ratio - 0.5).abs() < 1e-9);
}

#[test]
fn evaluator_feeds_controller_on_scroll() {
    let vp = ViewportSize::new(1000.0, 800.0);
    let mut ev = VisibilityEvaluator::new(ObserverConfig::reveal());
    let mut c = RevealController::new(ObserverConfig::reveal());
    c.observe([TargetId(0), TargetId(1)]);

    let mut targets = [
        (TargetId(0), Rect::new(0.0, 100.0, 100.0, 100.0)),
        (TargetId(1), Rect::new(0.0, 1200.0, 100.0, 100.0)),
    ];
    c.handle(&ev.evaluate(vp, &targets));
    assert!(c.is_activated(TargetId(0)));
    assert!(!c.is_activated(TargetId(1)));

    for (_, r) in targets.iter_mut() {
        r.top -= 600.0;
    }
    c.handle(&ev.evaluate(vp, &targets));
    assert!(c.is_activated(TargetId(0)));
    assert!(c.is_activated(TargetId(1)));
}

#[test]
fn negative_bottom_margin_shrinks_root() {
    let root = RootMargin::bottom_percent(-5.0).apply(ViewportSize::new(1000.0, 800.0));
    assert_eq!(root, Rect::new(0.0, 0.0, 1000.0, 760.0));
    assert_eq!(RootMargin::bottom_percent(-5.0).to_string(), "0px 0px -5% 0px");

    let band = RootMargin::vertical_percent(-20.0).apply(ViewportSize::new(1000.0, 800.0));
    assert_eq!(band, Rect::new(0.0, 160.0, 1000.0, 480.0));
}
