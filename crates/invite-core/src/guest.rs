//! Guest-side persistence: the quick "I'm coming" flag and the last RSVP.

use crate::constants::QUICK_RSVP_ACK_MS;
use crate::error::StoreError;
use crate::particles::{BatchId, Celebration};
use crate::platform::KeyValueStore;
use crate::signal::Topic;
use crate::timer::{Scheduler, TimerHandle};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub const GUEST_DATA_KEY: &str = "wedding_guest_data";
pub const QUICK_RSVP_KEY: &str = "quick_rsvp_coming";

/// What the RSVP form collects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuestInfo {
    pub name: String,
    pub attending: bool,
    pub plus_one: bool,
    pub dietary: String,
    pub message: String,
}

/// What is remembered across visits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub name: String,
    pub attending: bool,
    pub timestamp: i64,
}

pub struct GuestBook {
    store: Rc<dyn KeyValueStore>,
}

impl GuestBook {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn mark_coming(&self) -> Result<(), StoreError> {
        self.store.set(QUICK_RSVP_KEY, "true")
    }

    pub fn has_marked_coming(&self) -> bool {
        self.store.get(QUICK_RSVP_KEY).as_deref() == Some("true")
    }

    pub fn record_rsvp(&self, guest: &GuestInfo, now_ms: i64) -> Result<GuestRecord, StoreError> {
        let record = GuestRecord {
            name: guest.name.trim().to_string(),
            attending: guest.attending,
            timestamp: now_ms,
        };
        let json = serde_json::to_string(&record)?;
        self.store.set(GUEST_DATA_KEY, &json)?;
        Ok(record)
    }

    /// Last stored RSVP; unreadable data counts as none.
    pub fn last_rsvp(&self) -> Option<GuestRecord> {
        let raw = self.store.get(GUEST_DATA_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("[guest] ignoring unreadable stored RSVP: {}", e);
                None
            }
        }
    }

    pub fn forget(&self) -> Result<(), StoreError> {
        self.store.remove(GUEST_DATA_KEY)?;
        self.store.remove(QUICK_RSVP_KEY)
    }
}

/// The "I'm coming" button: a pop at the pointer, the stored flag, and an
/// acknowledgement that clears itself after a few seconds.
pub struct QuickRsvp {
    book: GuestBook,
    celebration: Rc<Celebration>,
    scheduler: Rc<dyn Scheduler>,
    acknowledged: Rc<Cell<bool>>,
    reset: Rc<Cell<Option<TimerHandle>>>,
    changes: Topic<bool>,
}

impl QuickRsvp {
    pub fn new(book: GuestBook, celebration: Rc<Celebration>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            book,
            celebration,
            scheduler,
            acknowledged: Rc::new(Cell::new(false)),
            reset: Rc::new(Cell::new(None)),
            changes: Topic::new(),
        }
    }

    pub fn press(&self, x: f32, y: f32) -> BatchId {
        let batch = self.celebration.trigger_pop(x, y);
        if let Err(e) = self.book.mark_coming() {
            log::warn!("[guest] could not remember quick RSVP: {}", e);
        }

        if let Some(h) = self.reset.take() {
            self.scheduler.cancel(h);
        }
        self.acknowledged.set(true);
        self.changes.publish(&true);

        let (ack, slot, out) = (
            self.acknowledged.clone(),
            self.reset.clone(),
            self.changes.clone(),
        );
        let handle = self.scheduler.set_timeout(
            Duration::from_millis(QUICK_RSVP_ACK_MS),
            Box::new(move || {
                slot.set(None);
                ack.set(false);
                out.publish(&false);
            }),
        );
        self.reset.set(Some(handle));
        batch
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged.get()
    }

    pub fn book(&self) -> &GuestBook {
        &self.book
    }

    pub fn changes(&self) -> &Topic<bool> {
        &self.changes
    }

    pub fn unmount(&self) {
        if let Some(h) = self.reset.take() {
            self.scheduler.cancel(h);
        }
    }
}

impl Drop for QuickRsvp {
    fn drop(&mut self) {
        self.unmount();
    }
}
