//! Scroll-synchronised timeline: fill progress of the vertical stem and the
//! set of event cards currently highlighted.

use crate::constants::HERO_PARALLAX_FACTOR;
use crate::platform::{RegionProbe, Viewport};
use crate::reveal::{IntersectionEntry, IntersectionFeed, ObserverConfig, TargetId};
use crate::signal::{Subscription, Topic};
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// One window scroll notification; `scroll_y` is `window.scrollY`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollEvent {
    pub scroll_y: f64,
}

pub type ScrollFeed = Topic<ScrollEvent>;

/// `clamp01((vh/2 - top) / height)`.
///
/// 0 until the region's top reaches the middle of the viewport, 1 once it is
/// a full region-height above it. A collapsed region jumps straight from 0
/// to 1 at the midline.
pub fn scroll_progress(top: f64, height: f64, viewport_height: f64) -> f64 {
    let travelled = viewport_height / 2.0 - top;
    if height <= 0.0 || !height.is_finite() {
        return if travelled >= 0.0 { 1.0 } else { 0.0 };
    }
    let p = travelled / height;
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 1.0)
}

/// Vertical background offset of the Home hero for a given scroll position.
#[inline]
pub fn hero_parallax_offset(scroll_y: f64) -> f64 {
    scroll_y * HERO_PARALLAX_FACTOR
}

pub struct TimelineProgressTracker {
    viewport: Rc<dyn Viewport>,
    region: Rc<dyn RegionProbe>,
    progress: f64,
}

impl TimelineProgressTracker {
    pub fn new(viewport: Rc<dyn Viewport>, region: Rc<dyn RegionProbe>) -> Self {
        Self {
            viewport,
            region,
            progress: 0.0,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Re-read geometry. Without a region the previous value is kept.
    pub fn recompute(&mut self) -> f64 {
        if let Some(rect) = self.region.rect() {
            self.progress = scroll_progress(rect.top, rect.height, self.viewport.size().height);
        }
        self.progress
    }
}

/// Tracker attached to the scroll feed; recomputes once at mount.
pub struct MountedTimeline {
    tracker: Rc<RefCell<TimelineProgressTracker>>,
    updates: Topic<f64>,
    _scroll: Subscription,
}

impl MountedTimeline {
    pub fn mount(tracker: TimelineProgressTracker, scroll: &ScrollFeed) -> Self {
        let tracker = Rc::new(RefCell::new(tracker));
        tracker.borrow_mut().recompute();

        let updates: Topic<f64> = Topic::new();
        let t = tracker.clone();
        let out = updates.clone();
        let sub = scroll.subscribe(move |_| {
            let p = t.borrow_mut().recompute();
            out.publish(&p);
        });
        log::debug!(
            "[timeline] mounted at progress {:.3}",
            tracker.borrow().progress()
        );
        Self {
            tracker,
            updates,
            _scroll: sub,
        }
    }

    pub fn progress(&self) -> f64 {
        self.tracker.borrow().progress()
    }

    /// Manual recompute, e.g. after a resize.
    pub fn refresh(&self) -> f64 {
        let p = self.tracker.borrow_mut().recompute();
        self.updates.publish(&p);
        p
    }

    pub fn updates(&self) -> &Topic<f64> {
        &self.updates
    }

    pub fn unmount(self) {
        log::debug!("[timeline] unmounted");
    }
}

/// Indices of timeline cards inside the highlight band. Unlike reveals,
/// membership is toggled both ways.
#[derive(Debug)]
pub struct ActiveSet {
    config: ObserverConfig,
    indices: FnvHashMap<TargetId, usize>,
    active: BTreeSet<usize>,
}

impl ActiveSet {
    pub fn new(config: ObserverConfig) -> Self {
        Self {
            config,
            indices: FnvHashMap::default(),
            active: BTreeSet::new(),
        }
    }

    pub fn register(&mut self, target: TargetId, index: usize) {
        self.indices.insert(target, index);
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.contains(&index)
    }

    /// Sorted ascending.
    pub fn active_indices(&self) -> Vec<usize> {
        self.active.iter().copied().collect()
    }

    /// Returns true when membership changed.
    pub fn handle(&mut self, entries: &[IntersectionEntry]) -> bool {
        let mut changed = false;
        for entry in entries {
            let Some(&index) = self.indices.get(&entry.target) else {
                continue;
            };
            changed |= if self.config.admits(entry) {
                self.active.insert(index)
            } else {
                self.active.remove(&index)
            };
        }
        changed
    }
}

pub struct MountedActiveSet {
    set: Rc<RefCell<ActiveSet>>,
    updates: Topic<Vec<usize>>,
    _feed: Subscription,
}

impl MountedActiveSet {
    pub fn mount(set: ActiveSet, feed: &IntersectionFeed) -> Self {
        let set = Rc::new(RefCell::new(set));
        let updates: Topic<Vec<usize>> = Topic::new();
        let s = set.clone();
        let out = updates.clone();
        let sub = feed.subscribe(move |entries| {
            let snapshot = {
                let mut set = s.borrow_mut();
                if !set.handle(entries) {
                    return;
                }
                set.active_indices()
            };
            out.publish(&snapshot);
        });
        Self {
            set,
            updates,
            _feed: sub,
        }
    }

    pub fn register(&self, target: TargetId, index: usize) {
        self.set.borrow_mut().register(target, index);
    }

    pub fn active_indices(&self) -> Vec<usize> {
        self.set.borrow().active_indices()
    }

    pub fn updates(&self) -> &Topic<Vec<usize>> {
        &self.updates
    }
}
