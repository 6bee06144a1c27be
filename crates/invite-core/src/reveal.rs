//! One-shot entrance reveals driven by viewport intersection.
//!
//! The controller only owns the `activated` flag of each target; the web
//! layer turns an activation into the `active` CSS class.

use crate::constants::{
    REVEAL_BOTTOM_MARGIN_PERCENT, REVEAL_THRESHOLD, TIMELINE_ACTIVE_MARGIN_PERCENT,
    TIMELINE_ACTIVE_THRESHOLD,
};
use crate::geometry::{intersection_ratio, Rect, RootMargin, ViewportSize};
use crate::signal::{Subscription, Topic};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

// IntersectionObserver reports ratios a hair under the threshold it fired on.
const RATIO_EPSILON: f64 = 1e-6;

/// Opaque reference to an observed element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub target: TargetId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

pub type IntersectionFeed = Topic<Vec<IntersectionEntry>>;

/// Visibility rule of one observer: minimum visible fraction plus root margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverConfig {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

impl ObserverConfig {
    /// Home and Photos reveal rule.
    pub const fn reveal() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            root_margin: RootMargin::ZERO,
        }
    }

    /// Events page reveal rule, firing slightly before the bottom edge.
    pub const fn reveal_early() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            root_margin: RootMargin::bottom_percent(REVEAL_BOTTOM_MARGIN_PERCENT),
        }
    }

    /// Timeline card highlighting, a band around the middle of the viewport.
    pub const fn timeline_active() -> Self {
        Self {
            threshold: TIMELINE_ACTIVE_THRESHOLD,
            root_margin: RootMargin::vertical_percent(TIMELINE_ACTIVE_MARGIN_PERCENT),
        }
    }

    #[inline]
    pub fn admits(&self, entry: &IntersectionEntry) -> bool {
        entry.is_intersecting && entry.ratio + RATIO_EPSILON >= self.threshold
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self::reveal()
    }
}

#[derive(Debug)]
pub struct RevealController {
    config: ObserverConfig,
    targets: FnvHashMap<TargetId, bool>,
}

impl RevealController {
    pub fn new(config: ObserverConfig) -> Self {
        Self {
            config,
            targets: FnvHashMap::default(),
        }
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    /// Begin tracking; already-tracked targets keep their flag.
    pub fn observe(&mut self, targets: impl IntoIterator<Item = TargetId>) {
        for t in targets {
            self.targets.entry(t).or_insert(false);
        }
    }

    pub fn is_observed(&self, target: TargetId) -> bool {
        self.targets.contains_key(&target)
    }

    pub fn is_activated(&self, target: TargetId) -> bool {
        self.targets.get(&target).copied().unwrap_or(false)
    }

    pub fn activated_count(&self) -> usize {
        self.targets.values().filter(|a| **a).count()
    }

    pub fn observed_count(&self) -> usize {
        self.targets.len()
    }

    /// Apply a batch of entries; returns targets activated by this batch.
    /// Entries for unknown targets are ignored and nothing ever deactivates.
    pub fn handle(&mut self, entries: &[IntersectionEntry]) -> SmallVec<[TargetId; 8]> {
        let mut newly = SmallVec::new();
        for entry in entries {
            if !self.config.admits(entry) {
                continue;
            }
            if let Some(activated) = self.targets.get_mut(&entry.target) {
                if !*activated {
                    *activated = true;
                    newly.push(entry.target);
                }
            }
        }
        newly
    }
}

/// Software stand-in for `IntersectionObserver`: computes entries from
/// element rectangles and reports each target only when it crosses the
/// threshold (plus once on first evaluation).
#[derive(Debug)]
pub struct VisibilityEvaluator {
    config: ObserverConfig,
    last: FnvHashMap<TargetId, bool>,
}

impl VisibilityEvaluator {
    pub fn new(config: ObserverConfig) -> Self {
        Self {
            config,
            last: FnvHashMap::default(),
        }
    }

    pub fn evaluate(
        &mut self,
        viewport: ViewportSize,
        targets: &[(TargetId, Rect)],
    ) -> Vec<IntersectionEntry> {
        let root = self.config.root_margin.apply(viewport);
        let mut out = Vec::new();
        for (id, rect) in targets {
            let overlap = rect.intersect(&root);
            let ratio = intersection_ratio(rect, &root);
            let entry = IntersectionEntry {
                target: *id,
                is_intersecting: overlap.is_some(),
                ratio,
            };
            let visible = self.config.admits(&entry);
            if self.last.insert(*id, visible) != Some(visible) {
                out.push(entry);
            }
        }
        out
    }
}

/// A [`RevealController`] attached to an intersection feed.
pub struct MountedReveal {
    controller: Rc<RefCell<RevealController>>,
    activations: Topic<TargetId>,
    _feed: Subscription,
}

impl MountedReveal {
    pub fn mount(controller: RevealController, feed: &IntersectionFeed) -> Self {
        let controller = Rc::new(RefCell::new(controller));
        let activations: Topic<TargetId> = Topic::new();

        let ctrl = controller.clone();
        let out = activations.clone();
        let sub = feed.subscribe(move |entries| {
            let newly = ctrl.borrow_mut().handle(entries);
            for id in newly {
                out.publish(&id);
            }
        });
        log::debug!(
            "[reveal] mounted with {} targets",
            controller.borrow().observed_count()
        );
        Self {
            controller,
            activations,
            _feed: sub,
        }
    }

    pub fn observe(&self, targets: impl IntoIterator<Item = TargetId>) {
        self.controller.borrow_mut().observe(targets);
    }

    pub fn is_activated(&self, target: TargetId) -> bool {
        self.controller.borrow().is_activated(target)
    }

    pub fn activated_count(&self) -> usize {
        self.controller.borrow().activated_count()
    }

    /// Fires once per target, on its activation.
    pub fn activations(&self) -> &Topic<TargetId> {
        &self.activations
    }

    pub fn unmount(self) {
        log::debug!("[reveal] unmounted");
    }
}
