/// DOM contract between the host page and the front-end.
///
/// The page markup ships with the site; these are the ids, classes and
/// attributes the wasm layer looks up or toggles.
// Page sections, one per route; `data-page` holds the route name
pub const PAGE_SELECTOR: &str = "[data-page]";
pub const PAGE_ATTR: &str = "data-page";
pub const NAV_ATTR: &str = "data-nav"; // nav buttons carry the target route
pub const MAIN_ID: &str = "main-content";

// Reveal / timeline
pub const REVEAL_CLASS: &str = "reveal";
pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";
pub const TIMELINE_ID: &str = "timeline";
pub const TIMELINE_FILL_ID: &str = "timeline-fill";
pub const TIMELINE_CARD_CLASS: &str = "event-card-trigger";
pub const DATA_INDEX_ATTR: &str = "data-index";
pub const HERO_ID: &str = "hero";

// Link buttons on timeline cards and venue cards
pub const MAP_BUTTON_ATTR: &str = "data-map-index";
pub const CALENDAR_BUTTON_ATTR: &str = "data-calendar-index";
pub const DIRECTIONS_BUTTON_ATTR: &str = "data-directions-index";

// Countdown
pub const COUNTDOWN_ID: &str = "countdown";
pub const COUNTDOWN_DIGIT_IDS: [&str; 4] = [
    "countdown-days",
    "countdown-hours",
    "countdown-minutes",
    "countdown-seconds",
];
pub const COUNTDOWN_DONE_ID: &str = "countdown-done";
pub const WALIMA_ONLY_CLASS: &str = "walima-only"; // shown only for walima invitations
pub const FULL_ONLY_CLASS: &str = "full-only";

// Particles
pub const PARTICLE_LAYER_ID: &str = "celebration-layer";
pub const AMBIENT_LAYER_ID: &str = "ambient-layer";
pub const COMING_BUTTON_ID: &str = "im-coming";
pub const COMING_LABEL_ID: &str = "im-coming-label";
pub const COMING_ICON_ID: &str = "im-coming-icon";
pub const RISE_BUTTON_ID: &str = "celebrate";
pub const COMING_LABEL_IDLE: &str = "I'm Coming!";
pub const COMING_LABEL_ACK: &str = "See You Soon!";
pub const COMING_ICON_IDLE: &str = "💖";
pub const COMING_ICON_ACK: &str = "❤️";

// Loading screen
pub const LOADING_ID: &str = "loading-screen";
pub const LOADING_STATUS_ID: &str = "loading-status";

// Story
pub const STORY_TEXT_ID: &str = "story-text";
pub const STORY_STYLE_ATTR: &str = "data-story-style";
pub const LOADING_CLASS: &str = "is-loading";

// RSVP form
pub const RSVP_FORM_ID: &str = "rsvp-form";
pub const RSVP_NAME_ID: &str = "rsvp-name";
pub const RSVP_ATTENDING_ID: &str = "rsvp-attending";
pub const RSVP_PLUS_ONE_ID: &str = "rsvp-plus-one";
pub const RSVP_DIETARY_ID: &str = "rsvp-dietary";
pub const RSVP_MESSAGE_ID: &str = "rsvp-message";
pub const RSVP_RESPONSE_ID: &str = "rsvp-response";
pub const RSVP_GREETING_ID: &str = "rsvp-greeting";

// Venue intelligence
pub const VENUE_TEXT_ID: &str = "venue-intel";
pub const VENUE_LINK_ID: &str = "venue-intel-link";
pub const VENUE_NAME: &str = "Celebration Venue, Karachi";

// Photos / face search
pub const FACE_INPUT_ID: &str = "face-upload";
pub const FACE_PREVIEW_ID: &str = "face-preview";
pub const FACE_STATUS_ID: &str = "face-status";
pub const FACE_RESET_ID: &str = "face-reset";
pub const GALLERY_CARD_SELECTOR: &str = "[data-gallery-title]";
pub const GALLERY_TITLE_ATTR: &str = "data-gallery-title";
pub const FACE_STATUS_SEARCHING: &str = "Running Neural Inference...";
pub const FACE_STATUS_NONE: &str = "No matching event streams found.";

// Full-screen gallery viewer
pub const LIGHTBOX_ID: &str = "gallery-viewer";
pub const LIGHTBOX_IMAGE_ID: &str = "gallery-viewer-image";
pub const LIGHTBOX_TITLE_ID: &str = "gallery-viewer-title";
pub const LIGHTBOX_DATE_ID: &str = "gallery-viewer-date";
pub const LIGHTBOX_CLOSE_ID: &str = "gallery-viewer-close";
pub const LIGHTBOX_BACKDROP_ID: &str = "gallery-viewer-backdrop";
pub const OPEN_KEY: &str = "Enter"; // keyboard activation of a focused card

// Query parameters selecting the walima-only invitation
pub const INVITE_PARAM: &str = "invite";
pub const WALIMA_VALUE: &str = "walima";

// Generative-AI endpoint
pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const GEMINI_API_KEY: Option<&str> = option_env!("GEMINI_API_KEY");

// Geolocation request used to ground venue descriptions
pub const GEO_TIMEOUT_MS: u32 = 5_000;
pub const GEO_MAX_AGE_MS: u32 = 60_000;
