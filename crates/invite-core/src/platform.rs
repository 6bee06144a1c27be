//! Browser capabilities the engine reads, behind traits so host tests can
//! substitute fakes for `window`, element geometry and `localStorage`.

use crate::error::StoreError;
use crate::geometry::{Rect, ViewportSize};
use fnv::FnvHashMap;
use std::cell::{Cell, RefCell};

pub trait Viewport {
    fn size(&self) -> ViewportSize;
}

/// Bounding rectangle of one tracked element; `None` while it is not in the page.
pub trait RegionProbe {
    fn rect(&self) -> Option<Rect>;
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Viewport with a settable size.
#[derive(Debug, Default)]
pub struct FixedViewport {
    size: Cell<ViewportSize>,
}

impl FixedViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Cell::new(ViewportSize::new(width, height)),
        }
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.size.set(ViewportSize::new(width, height));
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> ViewportSize {
        self.size.get()
    }
}

/// Region whose rectangle is set by hand, e.g. to simulate scrolling.
#[derive(Debug, Default)]
pub struct StaticRegion {
    rect: Cell<Option<Rect>>,
}

impl StaticRegion {
    pub fn new(rect: Option<Rect>) -> Self {
        Self {
            rect: Cell::new(rect),
        }
    }

    pub fn set(&self, rect: Option<Rect>) {
        self.rect.set(rect);
    }

    /// Move the region as the page scrolls by `dy` pixels.
    pub fn scroll_by(&self, dy: f64) {
        if let Some(mut r) = self.rect.get() {
            r.top -= dy;
            self.rect.set(Some(r));
        }
    }
}

impl RegionProbe for StaticRegion {
    fn rect(&self) -> Option<Rect> {
        self.rect.get()
    }
}

/// In-memory store; `read_only` simulates a quota-exceeded/private-mode browser.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<FnvHashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_only() -> Self {
        Self {
            entries: RefCell::default(),
            read_only: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Rejected {
                key: key.to_string(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Rejected {
                key: key.to_string(),
            });
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
