use crate::constants::*;
use crate::dom::{self, Listener};
use crate::query;
use invite_core::guest::QuickRsvp;
use invite_core::itinerary::{VENUES, WEDDING_EVENTS};
use invite_core::links;
use invite_core::Celebration;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn client_point(ev: &web::Event) -> (f32, f32) {
    match ev.dyn_ref::<web::MouseEvent>() {
        Some(m) => (m.client_x() as f32, m.client_y() as f32),
        None => (0.0, 0.0),
    }
}

/// "I'm coming": pop at the pointer plus the stored quick-RSVP flag.
pub fn wire_quick_rsvp(document: &web::Document, rsvp: Rc<QuickRsvp>) -> Option<Listener> {
    Listener::click(document, COMING_BUTTON_ID, move |ev| {
        let (x, y) = client_point(&ev);
        let batch = rsvp.press(x, y);
        log::info!("[rsvp] quick rsvp at ({:.0},{:.0}) batch {:?}", x, y, batch);
    })
}

/// Viewport-wide rising hearts.
pub fn wire_rise(document: &web::Document, celebration: Rc<Celebration>) -> Option<Listener> {
    Listener::click(document, RISE_BUTTON_ID, move |_| {
        celebration.trigger_rise();
    })
}

fn index_buttons(
    root: &web::Element,
    attr: &'static str,
    url_for: impl Fn(usize) -> Option<String> + Clone + 'static,
) -> Vec<Listener> {
    dom::query_all(root, &format!("[{}]", attr))
        .into_iter()
        .filter_map(|el| {
            let Some(index) = query::parse_data_index(el.get_attribute(attr).as_deref()) else {
                log::warn!("[links] {} without a usable index", attr);
                return None;
            };
            let url_for = url_for.clone();
            Listener::new(&el, "click", false, move |_| match url_for(index) {
                Some(url) => dom::open_in_new_tab(&url),
                None => log::warn!("[links] no link for {}={}", attr, index),
            })
        })
        .collect()
}

/// Map, add-to-calendar and directions buttons under `root`.
pub fn wire_link_buttons(root: &web::Element) -> Vec<Listener> {
    let mut out = index_buttons(root, MAP_BUTTON_ATTR, |i| {
        WEDDING_EVENTS.get(i).map(links::event_maps_url)
    });
    out.extend(index_buttons(root, CALENDAR_BUTTON_ATTR, |i| {
        let event = WEDDING_EVENTS.get(i)?;
        links::event_calendar_url(event)
            .map_err(|e| log::error!("[links] calendar link for {}: {}", event.title, e))
            .ok()
    }));
    out.extend(index_buttons(root, DIRECTIONS_BUTTON_ATTR, |i| {
        VENUES.get(i).map(links::venue_directions_url)
    }));
    out
}
