//! Full-screen gallery viewer on the Photos page.

use crate::itinerary::{find_gallery, GalleryItem};

/// Which gallery, if any, is expanded. Page scroll stays locked while one is.
#[derive(Debug, Default)]
pub struct Lightbox {
    current: Option<GalleryItem>,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand the gallery titled `title`. Unknown titles leave the viewer as it was.
    pub fn open(&mut self, title: &str) -> Option<GalleryItem> {
        let Some(item) = find_gallery(title) else {
            log::warn!("[gallery] no gallery titled {:?}", title);
            return None;
        };
        log::debug!("[gallery] open {}", item.title);
        self.current = Some(item);
        Some(item)
    }

    /// Returns whether anything was open.
    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<GalleryItem> {
        self.current
    }

    #[inline]
    pub fn scroll_locked(&self) -> bool {
        self.current.is_some()
    }
}
