// Gallery lookup and the full-screen viewer.

use invite_core::itinerary::*;
use invite_core::lightbox::Lightbox;

#[test]
fn opening_a_card_shows_that_gallery_and_locks_scroll() {
    let mut viewer = Lightbox::new();
    assert!(!viewer.scroll_locked());

    let item = viewer.open("Mehndi").unwrap();
    assert_eq!(item.date, "6 Feb 2026");
    assert_eq!(viewer.current().map(|g| g.title), Some("Mehndi"));
    assert!(viewer.scroll_locked());
    assert_eq!(item.full_image_url(), "https://picsum.photos/seed/inv4/1600/1200");
}

#[test]
fn closing_restores_scroll_once() {
    let mut viewer = Lightbox::new();
    viewer.open("Walima");
    assert!(viewer.close());
    assert!(!viewer.scroll_locked());
    assert_eq!(viewer.current(), None);
    assert!(!viewer.close());
}

#[test]
fn unknown_title_keeps_the_current_view() {
    let mut viewer = Lightbox::new();
    assert_eq!(viewer.open("Honeymoon"), None);
    assert!(!viewer.scroll_locked());

    viewer.open("Barat");
    assert_eq!(viewer.open("Honeymoon"), None);
    assert_eq!(viewer.current().map(|g| g.title), Some("Barat"));
}

#[test]
fn switching_cards_replaces_the_view() {
    let mut viewer = Lightbox::new();
    viewer.open("Ubtan");
    viewer.open("Qawali Night");
    assert_eq!(viewer.current().map(|g| g.image_seed), Some("inv5"));
    assert_eq!(
        find_gallery("Dua-e-Khair").map(|g| g.image_url()),
        Some("https://picsum.photos/seed/inv1/800/1000".to_string())
    );
}
