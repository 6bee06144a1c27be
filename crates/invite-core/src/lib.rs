pub mod ambient;
pub mod constants;
pub mod countdown;
pub mod error;
pub mod geometry;
pub mod guest;
pub mod itinerary;
pub mod lightbox;
pub mod links;
pub mod loading;
pub mod particles;
pub mod platform;
pub mod reveal;
pub mod services;
pub mod signal;
pub mod timeline;
pub mod timer;

pub use countdown::*;
pub use error::*;
pub use geometry::*;
pub use particles::*;
pub use platform::*;
pub use reveal::*;
pub use signal::*;
pub use timeline::*;
pub use timer::*;
