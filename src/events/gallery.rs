//! Gallery cards open a full-screen viewer; close button and backdrop dismiss it.

use crate::constants::*;
use crate::dom::{self, Listener};
use crate::overlay;
use invite_core::lightbox::Lightbox;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct GalleryViewer {
    document: web::Document,
    lightbox: Rc<RefCell<Lightbox>>,
    _listeners: Vec<Listener>,
}

fn open(document: &web::Document, lightbox: &RefCell<Lightbox>, title: &str) {
    let item = lightbox.borrow_mut().open(title);
    if item.is_some() {
        overlay::render_lightbox(document, item.as_ref());
    }
}

fn close(document: &web::Document, lightbox: &RefCell<Lightbox>) {
    if lightbox.borrow_mut().close() {
        overlay::render_lightbox(document, None);
    }
}

impl GalleryViewer {
    pub fn mount(document: &web::Document, root: &web::Element) -> GalleryViewer {
        let lightbox = Rc::new(RefCell::new(Lightbox::new()));
        let mut listeners = Vec::new();

        for card in dom::query_all(root, GALLERY_CARD_SELECTOR) {
            let Some(title) = card.get_attribute(GALLERY_TITLE_ATTR) else {
                continue;
            };
            let (doc, lb, t) = (document.clone(), lightbox.clone(), title.clone());
            listeners.extend(Listener::new(&card, "click", false, move |_| open(&doc, &lb, &t)));

            let (doc, lb) = (document.clone(), lightbox.clone());
            listeners.extend(Listener::new(&card, "keydown", false, move |ev| {
                let enter = ev
                    .dyn_ref::<web::KeyboardEvent>()
                    .is_some_and(|k| k.key() == OPEN_KEY);
                if enter {
                    ev.prevent_default();
                    open(&doc, &lb, &title);
                }
            }));
        }

        for id in [LIGHTBOX_CLOSE_ID, LIGHTBOX_BACKDROP_ID] {
            let (doc, lb) = (document.clone(), lightbox.clone());
            listeners.extend(Listener::click(document, id, move |_| close(&doc, &lb)));
        }

        overlay::render_lightbox(document, None);
        GalleryViewer {
            document: document.clone(),
            lightbox,
            _listeners: listeners,
        }
    }
}

impl Drop for GalleryViewer {
    fn drop(&mut self) {
        close(&self.document, &self.lightbox);
    }
}
