//! The four-day programme and the photo galleries.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub day: u8,
    pub date: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub time: &'static str,
    pub location: &'static str,
    pub note: Option<&'static str>,
    pub map_query: &'static str,
}

const GROOM_RESIDENCE: &str = "24.913683,67.238560";
const CELEBRATION_VENUE: &str = "24.911276, 67.238557";

pub const WEDDING_EVENTS: [ScheduledEvent; 6] = [
    ScheduledEvent {
        day: 1,
        date: "3 Feb 2026",
        title: "Dua-e-Khair",
        icon: "🤲",
        time: "4:00 PM",
        location: "Groom's Residence",
        note: None,
        map_query: GROOM_RESIDENCE,
    },
    ScheduledEvent {
        day: 1,
        date: "3 Feb 2026",
        title: "Ubtan",
        icon: "✨",
        time: "8:00 PM",
        location: "Groom's Residence",
        note: None,
        map_query: GROOM_RESIDENCE,
    },
    ScheduledEvent {
        day: 2,
        date: "5 Feb 2026",
        title: "Barat Departure",
        icon: "💍",
        time: "3:00 PM",
        location: "Groom's Residence",
        note: Some("Departure for Hyderabad"),
        map_query: GROOM_RESIDENCE,
    },
    ScheduledEvent {
        day: 3,
        date: "6 Feb 2026",
        title: "Mehndi",
        icon: "🌿",
        time: "7:00 PM",
        location: "Celebration Venue",
        note: None,
        map_query: CELEBRATION_VENUE,
    },
    ScheduledEvent {
        day: 3,
        date: "6 Feb 2026",
        title: "Qawali Night",
        icon: "🎶",
        time: "11:00 PM",
        location: "Celebration Venue",
        note: None,
        map_query: CELEBRATION_VENUE,
    },
    ScheduledEvent {
        day: 4,
        date: "7 Feb 2026",
        title: "Walima",
        icon: "🥂",
        time: "7:00 PM",
        location: "Celebration Venue",
        note: None,
        map_query: CELEBRATION_VENUE,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GalleryItem {
    pub title: &'static str,
    pub date: &'static str,
    pub image_seed: &'static str,
}

impl GalleryItem {
    pub fn image_url(&self) -> String {
        format!("https://picsum.photos/seed/{}/800/1000", self.image_seed)
    }

    /// Large landscape rendition shown in the full-screen viewer.
    pub fn full_image_url(&self) -> String {
        format!("https://picsum.photos/seed/{}/1600/1200", self.image_seed)
    }
}

pub const GALLERY: [GalleryItem; 6] = [
    GalleryItem {
        title: "Dua-e-Khair",
        date: "3 Feb 2026",
        image_seed: "inv1",
    },
    GalleryItem {
        title: "Ubtan",
        date: "3 Feb 2026",
        image_seed: "inv2",
    },
    GalleryItem {
        title: "Barat",
        date: "5 Feb 2026",
        image_seed: "inv3",
    },
    GalleryItem {
        title: "Mehndi",
        date: "6 Feb 2026",
        image_seed: "inv4",
    },
    GalleryItem {
        title: "Qawali Night",
        date: "6 Feb 2026",
        image_seed: "inv5",
    },
    GalleryItem {
        title: "Walima",
        date: "7 Feb 2026",
        image_seed: "inv6",
    },
];

pub fn gallery_titles() -> Vec<&'static str> {
    GALLERY.iter().map(|g| g.title).collect()
}

pub fn find_gallery(title: &str) -> Option<GalleryItem> {
    GALLERY.iter().find(|g| g.title == title).copied()
}

/// Galleries whose titles appear in `matches`; all of them when `matches` is `None`.
pub fn filter_gallery(matches: Option<&[String]>) -> Vec<GalleryItem> {
    match matches {
        None => GALLERY.to_vec(),
        Some(titles) => GALLERY
            .iter()
            .filter(|g| titles.iter().any(|t| t == g.title))
            .copied()
            .collect(),
    }
}

/// The two physical locations guests navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Venue {
    pub title: &'static str,
    pub coords: &'static str,
    pub note: &'static str,
}

pub const VENUES: [Venue; 2] = [
    Venue {
        title: "Groom's Residence",
        coords: "24.913683, 67.238560",
        note: "Primary hub for initial protocols",
    },
    Venue {
        title: "Celebration Venue",
        coords: "24.911276, 67.238557",
        note: "Central node for group celebrations",
    },
];
