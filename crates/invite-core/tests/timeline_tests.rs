// Scroll progress of the timeline stem and the highlighted card set.

use invite_core::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn progress_follows_midline_formula() {
    // viewport 800 -> midline at 400
    assert_eq!(scroll_progress(400.0, 1000.0, 800.0), 0.0);
    assert_eq!(scroll_progress(900.0, 1000.0, 800.0), 0.0);
    assert!((scroll_progress(-100.0, 1000.0, 800.0) - 0.5).abs() < 1e-12);
    assert_eq!(scroll_progress(-600.0, 1000.0, 800.0), 1.0);
    assert_eq!(scroll_progress(-5000.0, 1000.0, 800.0), 1.0);
}

#[test]
fn progress_is_always_in_unit_range() {
    for top in [-1e9, -1234.5, -1.0, 0.0, 1.0, 399.0, 401.0, 1e9] {
        for height in [-10.0, 0.0, 0.5, 10.0, 3000.0] {
            let p = scroll_progress(top, height, 800.0);
            assert!((0.0..=1.0).contains(&p), "top={top} height={height} -> {p}");
        }
    }
}

#[test]
fn collapsed_region_steps_at_midline() {
    assert_eq!(scroll_progress(401.0, 0.0, 800.0), 0.0);
    assert_eq!(scroll_progress(400.0, 0.0, 800.0), 1.0);
    assert_eq!(scroll_progress(-20.0, 0.0, 800.0), 1.0);
}

#[test]
fn mount_recomputes_before_any_scroll() {
    let vp = Rc::new(FixedViewport::new(1000.0, 800.0));
    let region = Rc::new(StaticRegion::new(Some(Rect::new(0.0, -100.0, 1000.0, 1000.0))));
    let feed = ScrollFeed::new();
    let t = MountedTimeline::mount(TimelineProgressTracker::new(vp, region), &feed);
    assert!((t.progress() - 0.5).abs() < 1e-12);
}

#[test]
fn scroll_events_update_progress() {
    let vp = Rc::new(FixedViewport::new(1000.0, 800.0));
    let region = Rc::new(StaticRegion::new(Some(Rect::new(0.0, 400.0, 1000.0, 1000.0))));
    let feed = ScrollFeed::new();
    let t = MountedTimeline::mount(
        TimelineProgressTracker::new(vp, region.clone()),
        &feed,
    );
    assert_eq!(t.progress(), 0.0);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let _sub = t.updates().subscribe(move |p| s.borrow_mut().push(*p));

    region.scroll_by(250.0);
    feed.publish(&ScrollEvent { scroll_y: 250.0 });
    region.scroll_by(750.0);
    feed.publish(&ScrollEvent { scroll_y: 1000.0 });

    assert_eq!(*seen.borrow(), vec![0.25, 1.0]);
}

#[test]
fn missing_region_keeps_previous_value() {
    let vp = Rc::new(FixedViewport::new(1000.0, 800.0));
    let region = Rc::new(StaticRegion::new(Some(Rect::new(0.0, -100.0, 1000.0, 1000.0))));
    let mut tracker = TimelineProgressTracker::new(vp, region.clone());
    assert!((tracker.recompute() - 0.5).abs() < 1e-12);
    region.set(None);
    assert!((tracker.recompute() - 0.5).abs() < 1e-12);
}

#[test]
fn unmount_stops_listening() {
    let vp = Rc::new(FixedViewport::new(1000.0, 800.0));
    let region = Rc::new(StaticRegion::new(None));
    let feed = ScrollFeed::new();
    let t = MountedTimeline::mount(TimelineProgressTracker::new(vp, region), &feed);
    assert_eq!(feed.listener_count(), 1);
    t.unmount();
    assert_eq!(feed.listener_count(), 0);
}

#[test]
fn hero_parallax_is_half_scroll() {
    assert_eq!(hero_parallax_offset(0.0), 0.0);
    assert_eq!(hero_parallax_offset(300.0), 150.0);
}

#[test]
fn active_set_toggles_both_ways() {
    let feed = IntersectionFeed::new();
    let set = MountedActiveSet::mount(ActiveSet::new(ObserverConfig::timeline_active()), &feed);
    for i in 0..4u32 {
        set.register(TargetId(100 + i), i as usize);
    }

    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let s = snapshots.clone();
    let _sub = set.updates().subscribe(move |v| s.borrow_mut().push(v.clone()));

    let e = |id: u32, on: bool, ratio: f64| IntersectionEntry {
        target: TargetId(id),
        is_intersecting: on,
        ratio,
    };
    feed.publish(&vec![e(102, true, 0.6), e(100, true, 0.4)]);
    // below the 0.3 threshold counts as leaving
    feed.publish(&vec![e(100, true, 0.1)]);
    // no change, no publish
    feed.publish(&vec![e(101, false, 0.0)]);
    feed.publish(&vec![e(102, false, 0.0), e(103, true, 1.0)]);

    assert_eq!(
        *snapshots.borrow(),
        vec![vec![0, 2], vec![2], vec![3]]
    );
    assert_eq!(set.active_indices(), vec![3]);
}

#[test]
fn progress_never_decreases_while_scrolling_down() {
    let vp = Rc::new(FixedViewport::new(390.0, 844.0));
    let region = Rc::new(StaticRegion::new(Some(Rect::new(0.0, 1500.0, 390.0, 2400.0))));
    let mut tracker = TimelineProgressTracker::new(vp, region.clone());
    let mut last = tracker.recompute();
    for _ in 0..200 {
        region.scroll_by(23.0);
        let p = tracker.recompute();
        assert!(p >= last);
        assert!((0.0..=1.0).contains(&p));
        last = p;
    }
    assert_eq!(last, 1.0);
}
