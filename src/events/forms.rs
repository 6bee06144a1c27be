//! Form-like widgets that round-trip through the AI service.

use crate::constants::*;
use crate::dom::{self, Listener};
use crate::gemini::FetchTransport;
use crate::geo;
use crate::overlay;
use crate::platform::BrowserClock;
use crate::query;
use invite_core::guest::{GuestBook, GuestInfo};
use invite_core::itinerary::gallery_titles;
use invite_core::services::{InvitationAi, StoryStyle, StoryView, VENUE_UNAVAILABLE};
use invite_core::Clock;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type Ai = Rc<InvitationAi<FetchTransport>>;

/// Only the newest request may write its answer; bumping the generation
/// also silences everything in flight when the page goes away.
#[derive(Clone, Default)]
struct Generation(Rc<Cell<u64>>);

impl Generation {
    fn next(&self) -> u64 {
        let g = self.0.get() + 1;
        self.0.set(g);
        g
    }

    fn is_current(&self, g: u64) -> bool {
        self.0.get() == g
    }
}

// ---------------------------------------------------------------------------
// story

pub struct StoryPanel {
    view: Rc<RefCell<StoryView>>,
    _listeners: Vec<Listener>,
}

fn render_story(document: &web::Document, view: &StoryView) {
    dom::set_text(document, STORY_TEXT_ID, view.text());
    overlay::set_busy(document, STORY_TEXT_ID, view.is_loading());
}

fn load_story(document: &web::Document, ai: &Ai, view: &Rc<RefCell<StoryView>>, style: StoryStyle) {
    let ticket = view.borrow_mut().begin();
    render_story(document, &view.borrow());
    log::info!("[story] requesting {} story", style.tag());

    let (document, ai, view) = (document.clone(), ai.clone(), view.clone());
    spawn_local(async move {
        let text = ai.story(style).await;
        if !view.borrow_mut().finish(ticket, text) {
            log::debug!("[story] dropping stale {} story", style.tag());
            return;
        }
        render_story(&document, &view.borrow());
    });
}

impl StoryPanel {
    /// Style buttons under `root`, plus the initial classic story.
    pub fn mount(document: &web::Document, root: &web::Element, ai: Ai) -> StoryPanel {
        let view = Rc::new(RefCell::new(StoryView::new()));
        let buttons = dom::query_all(root, &format!("[{}]", STORY_STYLE_ATTR));

        let listeners = buttons
            .iter()
            .filter_map(|btn| {
                let style = btn
                    .get_attribute(STORY_STYLE_ATTR)
                    .and_then(|tag| StoryStyle::from_tag(&tag))?;
                let (document, ai, view) = (document.clone(), ai.clone(), view.clone());
                let all = buttons.clone();
                let me = btn.clone();
                Listener::new(btn, "click", false, move |_| {
                    for b in &all {
                        dom::set_class(b, ACTIVE_CLASS, b.is_same_node(Some(me.as_ref())));
                    }
                    load_story(&document, &ai, &view, style);
                })
            })
            .collect();

        load_story(document, &ai, &view, StoryStyle::default());
        StoryPanel {
            view,
            _listeners: listeners,
        }
    }
}

impl Drop for StoryPanel {
    fn drop(&mut self) {
        self.view.borrow_mut().cancel();
    }
}

// ---------------------------------------------------------------------------
// rsvp form

fn field_value(document: &web::Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        return input.value();
    }
    if let Some(select) = el.dyn_ref::<web::HtmlSelectElement>() {
        return select.value();
    }
    if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}

fn checkbox(document: &web::Document, id: &str) -> bool {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        .map(|i| i.checked())
        .unwrap_or(false)
}

fn read_guest(document: &web::Document) -> GuestInfo {
    GuestInfo {
        name: field_value(document, RSVP_NAME_ID).trim().to_string(),
        attending: field_value(document, RSVP_ATTENDING_ID) != "no",
        plus_one: checkbox(document, RSVP_PLUS_ONE_ID),
        dietary: field_value(document, RSVP_DIETARY_ID),
        message: field_value(document, RSVP_MESSAGE_ID),
    }
}

fn greet(document: &web::Document, book: &GuestBook) {
    if let Some(record) = book.last_rsvp() {
        let text = if record.attending {
            format!("Welcome back, {}. We can't wait to see you!", record.name)
        } else {
            format!("Welcome back, {}. You will be missed!", record.name)
        };
        dom::set_text(document, RSVP_GREETING_ID, &text);
    }
}

pub struct RsvpForm {
    generation: Generation,
    _submit: Option<Listener>,
}

impl RsvpForm {
    pub fn mount(document: &web::Document, book: Rc<GuestBook>, ai: Ai) -> RsvpForm {
        greet(document, &book);

        let generation = Generation::default();
        let submit = document.get_element_by_id(RSVP_FORM_ID).and_then(|form| {
            let (document, generation) = (document.clone(), generation.clone());
            Listener::new(&form, "submit", false, move |ev| {
                ev.prevent_default();
                let guest = read_guest(&document);
                if guest.name.is_empty() {
                    log::warn!("[rsvp] submit without a name ignored");
                    return;
                }
                match book.record_rsvp(&guest, BrowserClock.now_ms()) {
                    Ok(record) => log::info!("[rsvp] stored rsvp for {}", record.name),
                    Err(e) => log::warn!("[rsvp] could not store rsvp: {}", e),
                }
                greet(&document, &book);

                let g = generation.next();
                overlay::set_busy(&document, RSVP_RESPONSE_ID, true);
                let (document, ai, generation) = (document.clone(), ai.clone(), generation.clone());
                spawn_local(async move {
                    let text = ai.rsvp_acknowledgment(&guest).await;
                    if generation.is_current(g) {
                        dom::set_text(&document, RSVP_RESPONSE_ID, &text);
                        overlay::set_busy(&document, RSVP_RESPONSE_ID, false);
                    }
                });
            })
        });
        if submit.is_none() {
            log::warn!("[rsvp] no #{} on this page", RSVP_FORM_ID);
        }
        RsvpForm {
            generation,
            _submit: submit,
        }
    }
}

impl Drop for RsvpForm {
    fn drop(&mut self) {
        self.generation.next();
    }
}

// ---------------------------------------------------------------------------
// venue intel

pub struct VenueIntelPanel {
    generation: Generation,
}

impl VenueIntelPanel {
    /// Ask for grounded venue details near the guest, if they allow it.
    pub fn mount(document: &web::Document, ai: Ai) -> VenueIntelPanel {
        let generation = Generation::default();
        let g = generation.next();
        overlay::set_busy(document, VENUE_TEXT_ID, true);

        let (document, watch) = (document.clone(), generation.clone());
        spawn_local(async move {
            let near = geo::current_position().await;
            let result = ai.venue(VENUE_NAME, near).await;
            if !watch.is_current(g) {
                return;
            }
            overlay::set_busy(&document, VENUE_TEXT_ID, false);
            match result {
                Ok(intel) => {
                    dom::set_text(&document, VENUE_TEXT_ID, &intel.description);
                    if let Some(link) = document.get_element_by_id(VENUE_LINK_ID) {
                        match intel.maps_uri {
                            Some(uri) => {
                                _ = link.set_attribute("href", &uri);
                                dom::set_class(&link, HIDDEN_CLASS, false);
                            }
                            None => dom::set_class(&link, HIDDEN_CLASS, true),
                        }
                    }
                }
                Err(_) => dom::set_text(&document, VENUE_TEXT_ID, VENUE_UNAVAILABLE),
            }
        });
        VenueIntelPanel { generation }
    }
}

impl Drop for VenueIntelPanel {
    fn drop(&mut self) {
        self.generation.next();
    }
}

// ---------------------------------------------------------------------------
// face search

pub struct FaceSearch {
    generation: Generation,
    _listeners: Vec<Listener>,
}

fn first_file(ev: &web::Event) -> Option<web::File> {
    ev.target()?
        .dyn_into::<web::HtmlInputElement>()
        .ok()?
        .files()?
        .get(0)
}

fn search(document: web::Document, ai: Ai, generation: Generation, data_url: String) {
    overlay::show_preview(&document, &data_url);
    let Some(payload) = query::data_url_payload(&data_url).map(str::to_string) else {
        log::warn!("[faces] upload was not a base64 data url");
        dom::set_text(&document, FACE_STATUS_ID, FACE_STATUS_NONE);
        return;
    };
    let g = generation.next();
    dom::set_text(&document, FACE_STATUS_ID, FACE_STATUS_SEARCHING);
    overlay::set_busy(&document, FACE_STATUS_ID, true);
    spawn_local(async move {
        let labels = gallery_titles();
        let matches = ai.face_search(&payload, &labels).await;
        if !generation.is_current(g) {
            return;
        }
        overlay::set_busy(&document, FACE_STATUS_ID, false);
        log::info!("[faces] {} matching galleries", matches.len());
        let status = if matches.is_empty() {
            FACE_STATUS_NONE.to_string()
        } else {
            format!("Found you in {} of our galleries.", matches.len())
        };
        dom::set_text(&document, FACE_STATUS_ID, &status);
        overlay::filter_gallery_cards(&document, Some(matches.as_slice()));
    });
}

impl FaceSearch {
    pub fn mount(document: &web::Document, ai: Ai) -> FaceSearch {
        let generation = Generation::default();
        let mut listeners = Vec::new();

        if let Some(input) = document.get_element_by_id(FACE_INPUT_ID) {
            let (document, generation) = (document.clone(), generation.clone());
            listeners.extend(Listener::new(&input, "change", false, move |ev| {
                let Some(file) = first_file(&ev) else {
                    return;
                };
                let reader = match web::FileReader::new() {
                    Ok(r) => r,
                    Err(e) => {
                        log::error!("[faces] FileReader unavailable: {:?}", e);
                        return;
                    }
                };
                let (document, ai, generation) = (document.clone(), ai.clone(), generation.clone());
                let done = reader.clone();
                let onload = Closure::once_into_js(move |_: web::Event| {
                    match done.result().ok().and_then(|v| v.as_string()) {
                        Some(url) => search(document, ai, generation, url),
                        None => log::warn!("[faces] reader produced no data url"),
                    }
                });
                reader.set_onload(Some(onload.unchecked_ref()));
                if let Err(e) = reader.read_as_data_url(&file) {
                    log::error!("[faces] readAsDataURL failed: {:?}", e);
                }
            }));
        }

        let reset_gen = generation.clone();
        listeners.extend(Listener::click(document, FACE_RESET_ID, {
            let document = document.clone();
            move |_| {
                reset_gen.next();
                overlay::set_busy(&document, FACE_STATUS_ID, false);
                dom::set_text(&document, FACE_STATUS_ID, "");
                if let Some(img) = document.get_element_by_id(FACE_PREVIEW_ID) {
                    dom::set_class(&img, HIDDEN_CLASS, true);
                }
                overlay::filter_gallery_cards(&document, None);
            }
        }));

        FaceSearch {
            generation,
            _listeners: listeners,
        }
    }
}

impl Drop for FaceSearch {
    fn drop(&mut self) {
        self.generation.next();
    }
}
