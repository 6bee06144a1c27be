use crate::constants::*;
use crate::dom;
use crate::query::{self, Route};
use invite_core::ambient::AmbientParticle;
use invite_core::itinerary::GalleryItem;
use invite_core::loading::{LoadingStage, LoadingState};
use invite_core::{Particle, TimeLeft};
use wasm_bindgen::JsCast;
use web_sys as web;

fn create_span(document: &web::Document, class: &str, text: &str, style: &str) -> Option<web::Element> {
    let el = document.create_element("span").ok()?;
    el.set_class_name(class);
    el.set_text_content(Some(text));
    _ = el.set_attribute("style", style);
    _ = el.set_attribute("aria-hidden", "true");
    Some(el)
}

/// Replace the celebration layer's children with the live particles.
pub fn render_particles(document: &web::Document, particles: &[Particle]) {
    let Some(layer) = document.get_element_by_id(PARTICLE_LAYER_ID) else {
        return;
    };
    layer.set_inner_html("");
    for p in particles {
        let style = query::particle_style(p.position.x, p.position.y, p.size, p.color.hex());
        if let Some(span) = create_span(document, p.style.css_class(), p.kind.glyph(), &style) {
            _ = layer.append_child(&span);
        }
    }
}

pub fn render_ambient(document: &web::Document, field: &[AmbientParticle]) {
    let Some(layer) = document.get_element_by_id(AMBIENT_LAYER_ID) else {
        return;
    };
    layer.set_inner_html("");
    for p in field {
        let style = query::ambient_style(p.left_percent, p.duration_s, p.delay_s, p.size_px);
        if let Some(span) = create_span(document, p.kind.css_class(), p.kind.glyph(), &style) {
            _ = layer.append_child(&span);
        }
    }
}

pub fn render_countdown(document: &web::Document, left: Option<TimeLeft>) {
    let done = document.get_element_by_id(COUNTDOWN_DONE_ID);
    match left {
        Some(t) => {
            for (id, digits) in COUNTDOWN_DIGIT_IDS.iter().zip(t.padded()) {
                dom::set_text(document, id, &digits);
            }
            if let Some(el) = document.get_element_by_id(COUNTDOWN_ID) {
                dom::set_class(&el, HIDDEN_CLASS, false);
            }
            if let Some(el) = done {
                dom::set_class(&el, HIDDEN_CLASS, true);
            }
        }
        None => {
            if let Some(el) = document.get_element_by_id(COUNTDOWN_ID) {
                dom::set_class(&el, HIDDEN_CLASS, true);
            }
            if let Some(el) = done {
                dom::set_class(&el, HIDDEN_CLASS, false);
            }
        }
    }
}

pub fn render_timeline_fill(document: &web::Document, progress: f64) {
    if let Some(fill) = dom::by_id(document, TIMELINE_FILL_ID) {
        dom::set_style(&fill, "transform", &query::fill_transform(progress));
    }
}

/// Toggle `active` on timeline cards, each paired with its `data-index`.
pub fn render_active_cards(cards: &[(web::Element, usize)], active: &[usize]) {
    for (card, index) in cards {
        dom::set_class(card, ACTIVE_CLASS, active.contains(index));
    }
}

pub fn render_parallax(document: &web::Document, offset_px: f64) {
    if let Some(hero) = dom::by_id(document, HERO_ID) {
        dom::set_style(&hero, "background-position", &format!("center {:.1}px", offset_px));
    }
}

pub fn render_loading(document: &web::Document, state: LoadingState) {
    dom::set_text(document, LOADING_STATUS_ID, state.status);
    let Some(screen) = document.get_element_by_id(LOADING_ID) else {
        return;
    };
    for stage in [LoadingStage::Pulsing, LoadingStage::Opening, LoadingStage::Complete] {
        dom::set_class(&screen, stage.css_class(), stage == state.stage);
    }
}

pub fn hide_loading(document: &web::Document) {
    if let Some(screen) = document.get_element_by_id(LOADING_ID) {
        dom::set_class(&screen, HIDDEN_CLASS, true);
        _ = screen.set_attribute("aria-hidden", "true");
    }
}

pub fn render_quick_rsvp(document: &web::Document, acknowledged: bool) {
    let (label, icon) = if acknowledged {
        (COMING_LABEL_ACK, COMING_ICON_ACK)
    } else {
        (COMING_LABEL_IDLE, COMING_ICON_IDLE)
    };
    dom::set_text(document, COMING_LABEL_ID, label);
    dom::set_text(document, COMING_ICON_ID, icon);
    if let Some(btn) = document.get_element_by_id(COMING_BUTTON_ID) {
        dom::set_class(&btn, ACTIVE_CLASS, acknowledged);
    }
}

/// Show only the elements meant for the current invitation type.
pub fn render_invitation_kind(document: &web::Document, walima_only: bool) {
    let Some(root) = document.document_element() else {
        return;
    };
    for el in dom::query_all(&root, &format!(".{}", WALIMA_ONLY_CLASS)) {
        dom::set_class(&el, HIDDEN_CLASS, !walima_only);
    }
    for el in dom::query_all(&root, &format!(".{}", FULL_ONLY_CLASS)) {
        dom::set_class(&el, HIDDEN_CLASS, walima_only);
    }
}

pub fn set_busy(document: &web::Document, id: &str, busy: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        dom::set_class(&el, LOADING_CLASS, busy);
        _ = el.set_attribute("aria-busy", if busy { "true" } else { "false" });
    }
}

/// Show the face-search preview image.
pub fn show_preview(document: &web::Document, data_url: &str) {
    if let Some(img) = document.get_element_by_id(FACE_PREVIEW_ID) {
        _ = img.set_attribute("src", data_url);
        dom::set_class(&img, HIDDEN_CLASS, false);
    }
}

/// Hide gallery cards not named in `titles`; `None` shows every card.
pub fn filter_gallery_cards(document: &web::Document, titles: Option<&[String]>) {
    let Some(root) = document.document_element() else {
        return;
    };
    for card in dom::query_all(&root, GALLERY_CARD_SELECTOR) {
        let visible = match (titles, card.get_attribute(GALLERY_TITLE_ATTR)) {
            (None, _) => true,
            (Some(ts), Some(title)) => ts.iter().any(|t| *t == title),
            (Some(_), None) => false,
        };
        dom::set_class(&card, HIDDEN_CLASS, !visible);
    }
}

/// Freeze page scrolling under a modal, or release it.
pub fn lock_scroll(document: &web::Document, locked: bool) {
    if let Some(body) = document.body() {
        dom::set_style(&body, "overflow", if locked { "hidden" } else { "auto" });
    }
}

/// Open the gallery viewer on `item`, or close it when `None`.
pub fn render_lightbox(document: &web::Document, item: Option<&GalleryItem>) {
    if let Some(item) = item {
        if let Some(img) = document.get_element_by_id(LIGHTBOX_IMAGE_ID) {
            _ = img.set_attribute("src", &item.full_image_url());
            _ = img.set_attribute("alt", item.title);
        }
        dom::set_text(document, LIGHTBOX_TITLE_ID, item.title);
        dom::set_text(document, LIGHTBOX_DATE_ID, item.date);
    }
    if let Some(viewer) = document.get_element_by_id(LIGHTBOX_ID) {
        dom::set_class(&viewer, HIDDEN_CLASS, item.is_none());
        _ = viewer.set_attribute("aria-hidden", if item.is_some() { "false" } else { "true" });
    }
    lock_scroll(document, item.is_some());
}

/// Show the section for `route`, hide the others, and mark the nav button.
pub fn render_route(document: &web::Document, route: Route) {
    let Some(root) = document.document_element() else {
        return;
    };
    for section in dom::query_all(&root, PAGE_SELECTOR) {
        let on = section.get_attribute(PAGE_ATTR).as_deref() == Some(route.name());
        dom::set_class(&section, HIDDEN_CLASS, !on);
    }
    for button in dom::query_all(&root, &format!("[{}]", NAV_ATTR)) {
        let on = button.get_attribute(NAV_ATTR).as_deref() == Some(route.name());
        dom::set_class(&button, ACTIVE_CLASS, on);
        if on {
            _ = button.set_attribute("aria-current", "page");
        } else {
            _ = button.remove_attribute("aria-current");
        }
    }
}

/// Focus the main region after a route change so screen readers follow it.
pub fn focus_main(document: &web::Document) {
    if let Some(main) = document
        .get_element_by_id(MAIN_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        _ = main.focus();
    }
}
