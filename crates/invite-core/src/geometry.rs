//! Viewport-relative rectangles and `IntersectionObserver`-style root margins.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Bounding box in CSS pixels, relative to the viewport's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlapping region, `None` when the rectangles do not touch.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginLength {
    Px(f64),
    Percent(f64),
}

impl MarginLength {
    /// Resolve against the root extent on the same axis.
    #[inline]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            MarginLength::Px(px) => px,
            MarginLength::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginLength::Px(px) => write!(f, "{}px", px),
            MarginLength::Percent(pct) => write!(f, "{}%", pct),
        }
    }
}

/// Grows (positive) or shrinks (negative) the viewport before intersecting,
/// in CSS `rootMargin` order: top, right, bottom, left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: MarginLength::Px(0.0),
        right: MarginLength::Px(0.0),
        bottom: MarginLength::Px(0.0),
        left: MarginLength::Px(0.0),
    };

    pub const fn bottom_percent(pct: f64) -> Self {
        RootMargin {
            bottom: MarginLength::Percent(pct),
            ..Self::ZERO
        }
    }

    pub const fn vertical_percent(pct: f64) -> Self {
        RootMargin {
            top: MarginLength::Percent(pct),
            bottom: MarginLength::Percent(pct),
            ..Self::ZERO
        }
    }

    /// Root rectangle after applying the margin to a viewport of `size`.
    pub fn apply(&self, size: ViewportSize) -> Rect {
        let top = self.top.resolve(size.height);
        let bottom = self.bottom.resolve(size.height);
        let left = self.left.resolve(size.width);
        let right = self.right.resolve(size.width);
        Rect::new(
            -left,
            -top,
            (size.width + left + right).max(0.0),
            (size.height + top + bottom).max(0.0),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Fraction of `element` inside `root`, as `IntersectionObserverEntry.intersectionRatio`.
pub fn intersection_ratio(element: &Rect, root: &Rect) -> f64 {
    let Some(overlap) = element.intersect(root) else {
        return 0.0;
    };
    let area = element.area();
    if area <= 0.0 {
        // Zero-area targets count as fully visible while they touch the root.
        return 1.0;
    }
    (overlap.area() / area).clamp(0.0, 1.0)
}
