//! Google Calendar and Google Maps deep links. Pure string formatting.

use crate::constants::CALENDAR_EVENT_HOURS;
use crate::error::LinkError;
use crate::itinerary::{ScheduledEvent, Venue};
use chrono::{Duration, NaiveDate, NaiveTime};
use urlencoding::encode;

const CALENDAR_BASE: &str = "https://www.google.com/calendar/render?action=TEMPLATE";
const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";
const MAPS_DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1&destination=";
const DEFAULT_DETAILS: &str = "Join us for our wedding celebration!";
const STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

pub fn maps_search_url(query: &str) -> String {
    format!("{}{}", MAPS_SEARCH_BASE, encode(query))
}

pub fn maps_directions_url(destination: &str) -> String {
    format!("{}{}", MAPS_DIRECTIONS_BASE, encode(destination))
}

/// `date` like "3 Feb 2026", `time` like "4:00 PM". The entry lasts three
/// hours and may end on the following day.
pub fn calendar_url(
    title: &str,
    date: &str,
    time: &str,
    location: &str,
    note: Option<&str>,
) -> Result<String, LinkError> {
    let day = NaiveDate::parse_from_str(date.trim(), "%d %b %Y")
        .map_err(|_| LinkError::Date(date.to_string()))?;
    let at = NaiveTime::parse_from_str(time.trim(), "%I:%M %p")
        .map_err(|_| LinkError::Time(time.to_string()))?;
    let start = day.and_time(at);
    let end = start + Duration::hours(CALENDAR_EVENT_HOURS);

    let details = match note {
        Some(n) => format!("Note: {}", n),
        None => DEFAULT_DETAILS.to_string(),
    };
    Ok(format!(
        "{}&text={}&dates={}/{}&details={}&location={}&sf=true&output=xml",
        CALENDAR_BASE,
        encode(title),
        start.format(STAMP_FORMAT),
        end.format(STAMP_FORMAT),
        encode(&details),
        encode(location),
    ))
}

pub fn event_calendar_url(event: &ScheduledEvent) -> Result<String, LinkError> {
    calendar_url(event.title, event.date, event.time, event.location, event.note)
}

pub fn event_maps_url(event: &ScheduledEvent) -> String {
    maps_search_url(event.map_query)
}

pub fn venue_directions_url(venue: &Venue) -> String {
    maps_directions_url(venue.coords)
}
