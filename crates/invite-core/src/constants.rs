//! Engine tuning constants.
//!
//! Thresholds and margins were tuned by eye; they are the defaults of the
//! config structs in `reveal`, `timeline` and `particles`, not fixed behavior.

// Reveal observer (one-shot entrance)
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_BOTTOM_MARGIN_PERCENT: f64 = -5.0; // fire slightly before the bottom edge

// Timeline card observer (toggles while scrolling)
pub const TIMELINE_ACTIVE_THRESHOLD: f64 = 0.3;
pub const TIMELINE_ACTIVE_MARGIN_PERCENT: f64 = -20.0; // applied to top and bottom

// Home hero background drifts at half the scroll speed
pub const HERO_PARALLAX_FACTOR: f64 = 0.5;

// Pop burst ("I'm coming")
pub const POP_BATCH_SIZE: usize = 24;
pub const POP_JITTER_PX: f32 = 20.0;
pub const POP_SIZE_MIN_PX: f32 = 10.0;
pub const POP_SIZE_MAX_PX: f32 = 20.0;
pub const POP_HEART_PROBABILITY: f64 = 0.7;
pub const POP_LIFETIME_MS: u64 = 1000;

// Rise burst (viewport-wide)
pub const RISE_BATCH_NARROW: usize = 15;
pub const RISE_BATCH_WIDE: usize = 30;
pub const RISE_NARROW_BREAKPOINT_PX: f64 = 768.0;
pub const RISE_SIZE_MIN_PX: f32 = 20.0;
pub const RISE_SIZE_MAX_PX: f32 = 40.0;
pub const RISE_SPAWN_DEPTH_PX: f32 = 40.0; // how far below the bottom edge particles start
pub const RISE_HEART_PROBABILITY: f64 = 0.7;
pub const RISE_LIFETIME_MS: u64 = 3000;

// Ambient background field
pub const AMBIENT_COUNT: usize = 15;
pub const AMBIENT_DURATION_MIN_S: f32 = 15.0;
pub const AMBIENT_DURATION_MAX_S: f32 = 30.0;
pub const AMBIENT_DELAY_MAX_S: f32 = 10.0;
pub const AMBIENT_SIZE_MIN_PX: f32 = 10.0;
pub const AMBIENT_SIZE_MAX_PX: f32 = 20.0;
pub const AMBIENT_PETAL_PROBABILITY: f64 = 0.5;

// Countdown
pub const COUNTDOWN_TICK_MS: u64 = 1000;
pub const MS_PER_SECOND: i64 = 1000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

// Countdown targets, wall-clock local time of the venue
pub const FULL_CELEBRATION_START: &str = "2026-02-03T00:00:00";
pub const WALIMA_START: &str = "2026-02-07T19:00:00";

// Loading screen
pub const LOADING_STATUS_INTERVAL_MS: u64 = 800;
pub const LOADING_OPENING_AT_MS: u64 = 3500;
pub const LOADING_COMPLETE_AT_MS: u64 = 4500;

// Quick RSVP acknowledgement stays visible this long
pub const QUICK_RSVP_ACK_MS: u64 = 3000;

// Calendar entries span this many hours
pub const CALENDAR_EVENT_HOURS: i64 = 3;
