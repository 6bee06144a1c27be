// Stored RSVP records and the quick "I'm coming" button.

use invite_core::guest::*;
use invite_core::*;
use std::rc::Rc;
use std::time::Duration;

fn guest(name: &str, attending: bool) -> GuestInfo {
    GuestInfo {
        name: name.to_string(),
        attending,
        ..GuestInfo::default()
    }
}

#[test]
fn rsvp_record_is_stored_as_camel_case_json() {
    let store = Rc::new(MemoryStore::new());
    let book = GuestBook::new(store.clone());
    let rec = book.record_rsvp(&guest("  Ayesha ", true), 1_700_000_000_000).unwrap();
    assert_eq!(rec.name, "Ayesha");

    let raw = store.get(GUEST_DATA_KEY).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["name"], "Ayesha");
    assert_eq!(v["attending"], true);
    assert_eq!(v["timestamp"], 1_700_000_000_000i64);
    assert_eq!(book.last_rsvp(), Some(rec));
}

#[test]
fn unreadable_record_reads_as_absent() {
    let store = Rc::new(MemoryStore::new());
    store.set(GUEST_DATA_KEY, "{not json").unwrap();
    assert_eq!(GuestBook::new(store).last_rsvp(), None);
}

#[test]
fn read_only_store_surfaces_rejection() {
    let book = GuestBook::new(Rc::new(MemoryStore::read_only()));
    assert!(matches!(
        book.record_rsvp(&guest("Sara", false), 0),
        Err(StoreError::Rejected { .. })
    ));
    assert!(book.mark_coming().is_err());
    assert!(!book.has_marked_coming());
}

#[test]
fn forget_clears_both_keys() {
    let store = Rc::new(MemoryStore::new());
    let book = GuestBook::new(store.clone());
    book.mark_coming().unwrap();
    book.record_rsvp(&guest("Omar", true), 5).unwrap();
    assert_eq!(store.len(), 2);
    book.forget().unwrap();
    assert!(store.is_empty());
}

fn quick_rsvp(store: Rc<MemoryStore>) -> (Rc<ManualScheduler>, Rc<Celebration>, QuickRsvp) {
    let sched = Rc::new(ManualScheduler::new(0));
    let celebration = Rc::new(Celebration::new(
        ParticleEmitter::new(3),
        sched.clone(),
        sched.clone(),
        Rc::new(FixedViewport::new(1024.0, 768.0)),
    ));
    let rsvp = QuickRsvp::new(GuestBook::new(store), celebration.clone(), sched.clone());
    (sched, celebration, rsvp)
}

#[test]
fn press_pops_marks_and_acknowledges() {
    let store = Rc::new(MemoryStore::new());
    let (sched, celebration, rsvp) = quick_rsvp(store.clone());

    rsvp.press(120.0, 80.0);
    assert_eq!(celebration.active_count(), 24);
    assert_eq!(store.get(QUICK_RSVP_KEY).as_deref(), Some("true"));
    assert!(rsvp.book().has_marked_coming());
    assert!(rsvp.is_acknowledged());

    sched.advance(Duration::from_millis(2999));
    assert!(rsvp.is_acknowledged());
    sched.advance(Duration::from_millis(1));
    assert!(!rsvp.is_acknowledged());
    assert_eq!(celebration.active_count(), 0);
}

#[test]
fn repeated_press_restarts_acknowledgement() {
    let (sched, _c, rsvp) = quick_rsvp(Rc::new(MemoryStore::new()));
    rsvp.press(0.0, 0.0);
    sched.advance(Duration::from_millis(2000));
    rsvp.press(0.0, 0.0);
    sched.advance(Duration::from_millis(2000));
    assert!(rsvp.is_acknowledged());
    sched.advance(Duration::from_millis(1000));
    assert!(!rsvp.is_acknowledged());
}

#[test]
fn press_still_celebrates_when_storage_is_full() {
    let (_sched, celebration, rsvp) = quick_rsvp(Rc::new(MemoryStore::read_only()));
    rsvp.press(0.0, 0.0);
    assert_eq!(celebration.active_count(), 24);
    assert!(rsvp.is_acknowledged());
}
