//! Bridges from browser event sources to the engine's feeds.

use crate::dom::Listener;
use invite_core::{
    IntersectionEntry, IntersectionFeed, ObserverConfig, ScrollEvent, ScrollFeed, TargetId,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// One `IntersectionObserver`; each observed element gets a `TargetId`
/// equal to its position in observation order.
pub struct DomObserver {
    observer: web::IntersectionObserver,
    targets: Rc<RefCell<Vec<web::Element>>>,
    feed: IntersectionFeed,
    _callback: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
}

impl DomObserver {
    pub fn new(config: &ObserverConfig) -> anyhow::Result<DomObserver> {
        let feed = IntersectionFeed::new();
        let targets: Rc<RefCell<Vec<web::Element>>> = Rc::new(RefCell::new(Vec::new()));

        let out = feed.clone();
        let known = targets.clone();
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _obs: web::IntersectionObserver| {
                let batch: Vec<IntersectionEntry> = {
                    let known = known.borrow();
                    entries
                        .iter()
                        .filter_map(|v| v.dyn_into::<web::IntersectionObserverEntry>().ok())
                        .filter_map(|e| {
                            let el = e.target();
                            let idx = known.iter().position(|k| k.is_same_node(Some(el.as_ref())))?;
                            Some(IntersectionEntry {
                                target: TargetId(idx as u32),
                                is_intersecting: e.is_intersecting(),
                                ratio: e.intersection_ratio(),
                            })
                        })
                        .collect()
                };
                if !batch.is_empty() {
                    out.publish(&batch);
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let init = web::IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(config.threshold));
        init.set_root_margin(&config.root_margin.to_string());
        let observer = web::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        )
        .map_err(|e| anyhow::anyhow!("IntersectionObserver: {:?}", e))?;

        Ok(DomObserver {
            observer,
            targets,
            feed,
            _callback: callback,
        })
    }

    /// Observe `elements`, returning the ids they were assigned.
    pub fn observe(&self, elements: impl IntoIterator<Item = web::Element>) -> Vec<TargetId> {
        let mut ids = Vec::new();
        let mut targets = self.targets.borrow_mut();
        for el in elements {
            self.observer.observe(&el);
            ids.push(TargetId(targets.len() as u32));
            targets.push(el);
        }
        ids
    }

    pub fn feed(&self) -> &IntersectionFeed {
        &self.feed
    }
}

impl Drop for DomObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Passive `scroll` listener on `window`, republished as [`ScrollEvent`]s.
pub struct ScrollSource {
    feed: ScrollFeed,
    _listener: Option<Listener>,
}

impl ScrollSource {
    pub fn attach() -> ScrollSource {
        let feed = ScrollFeed::new();
        let listener = web::window().and_then(|w| {
            let out = feed.clone();
            let win = w.clone();
            Listener::new(&w, "scroll", true, move |_| {
                let scroll_y = win.scroll_y().unwrap_or(0.0);
                out.publish(&ScrollEvent { scroll_y });
            })
        });
        ScrollSource {
            feed,
            _listener: listener,
        }
    }

    pub fn feed(&self) -> &ScrollFeed {
        &self.feed
    }

    pub fn current() -> ScrollEvent {
        ScrollEvent {
            scroll_y: web::window()
                .and_then(|w| w.scroll_y().ok())
                .unwrap_or(0.0),
        }
    }
}
