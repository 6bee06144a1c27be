//! Per-route mounting. A `Page` owns everything one route wires up;
//! dropping it cancels timers, disconnects observers and removes listeners.

use crate::constants::*;
use crate::dom::{self, Listener};
use crate::events::forms::{Ai, FaceSearch, RsvpForm, StoryPanel, VenueIntelPanel};
use crate::events::gallery::GalleryViewer;
use crate::events::pointer;
use crate::observe::{DomObserver, ScrollSource};
use crate::overlay;
use crate::platform::{BrowserClock, BrowserScheduler, BrowserViewport, ElementProbe, LocalStore};
use crate::query::{self, Route};
use anyhow::anyhow;
use invite_core::ambient::ambient_field;
use invite_core::constants::{AMBIENT_COUNT, FULL_CELEBRATION_START, WALIMA_START};
use invite_core::guest::{GuestBook, QuickRsvp};
use invite_core::{
    hero_parallax_offset, parse_timestamp_ms, ActiveSet, Celebration, Clock, CountdownClock,
    MountedActiveSet, MountedReveal, MountedTimeline, ObserverConfig, ParticleEmitter,
    RevealController, Scheduler, Subscription, TimelineProgressTracker, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Shared browser services handed to every page.
pub struct Env {
    pub document: web::Document,
    pub ai: Ai,
    pub store: Rc<LocalStore>,
    pub clock: Rc<BrowserClock>,
    pub scheduler: Rc<BrowserScheduler>,
    pub viewport: Rc<BrowserViewport>,
    pub walima_only: bool,
}

impl Env {
    fn clock(&self) -> Rc<dyn Clock> {
        self.clock.clone()
    }

    fn scheduler(&self) -> Rc<dyn Scheduler> {
        self.scheduler.clone()
    }

    fn viewport(&self) -> Rc<dyn Viewport> {
        self.viewport.clone()
    }

    fn book(&self) -> GuestBook {
        GuestBook::new(self.store.clone())
    }
}

/// Countdown target as local wall-clock time in the guest's browser.
fn local_target_ms(text: &str) -> i64 {
    let local = js_sys::Date::new(&JsValue::from_str(text)).get_time();
    if local.is_finite() {
        return local as i64;
    }
    match parse_timestamp_ms(text) {
        Ok(ms) => ms,
        Err(e) => {
            log::error!("[countdown] {}", e);
            0
        }
    }
}

pub struct Page {
    route: Route,
    document: web::Document,
    // Field order is drop order: listeners and feeds go before the
    // components they feed.
    listeners: Vec<Listener>,
    subscriptions: Vec<Subscription>,
    reveals: Vec<MountedReveal>,
    timeline: Option<MountedTimeline>,
    active_cards: Option<MountedActiveSet>,
    observers: Vec<DomObserver>,
    scroll: Option<ScrollSource>,
    countdown: Option<CountdownClock>,
    quick_rsvp: Option<Rc<QuickRsvp>>,
    celebration: Option<Rc<Celebration>>,
    story: Option<StoryPanel>,
    rsvp_form: Option<RsvpForm>,
    venue: Option<VenueIntelPanel>,
    faces: Option<FaceSearch>,
    gallery: Option<GalleryViewer>,
}

impl Page {
    pub fn mount(route: Route, env: &Env) -> anyhow::Result<Page> {
        let document = env.document.clone();
        let root = document
            .query_selector(&format!("[{}=\"{}\"]", PAGE_ATTR, route.name()))
            .map_err(|e| anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow!("missing [{}={}] section", PAGE_ATTR, route.name()))?;

        overlay::render_route(&document, route);
        let mut page = Page {
            route,
            document,
            listeners: Vec::new(),
            subscriptions: Vec::new(),
            reveals: Vec::new(),
            timeline: None,
            active_cards: None,
            observers: Vec::new(),
            scroll: None,
            countdown: None,
            quick_rsvp: None,
            celebration: None,
            story: None,
            rsvp_form: None,
            venue: None,
            faces: None,
            gallery: None,
        };

        match route {
            Route::Home => {
                page.mount_reveals(&root, ObserverConfig::reveal())?;
                page.mount_home(&root, env);
            }
            Route::Events => {
                page.mount_reveals(&root, ObserverConfig::reveal_early())?;
                page.mount_events(&root, env)?;
            }
            Route::Photos => {
                page.mount_reveals(&root, ObserverConfig::reveal())?;
                page.faces = Some(FaceSearch::mount(&page.document, env.ai.clone()));
                page.gallery = Some(GalleryViewer::mount(&page.document, &root));
            }
        }
        log::info!("[page] mounted {}", route.name());
        Ok(page)
    }

    pub fn route(&self) -> Route {
        self.route
    }

    fn scroll_source(&mut self) -> &ScrollSource {
        self.scroll.get_or_insert_with(ScrollSource::attach)
    }

    fn mount_reveals(&mut self, root: &web::Element, config: ObserverConfig) -> anyhow::Result<()> {
        let elements = dom::query_all(root, &format!(".{}", REVEAL_CLASS));
        if elements.is_empty() {
            return Ok(());
        }
        let observer = DomObserver::new(&config)?;
        let reveal = MountedReveal::mount(RevealController::new(config), observer.feed());
        let ids = observer.observe(elements.iter().cloned());
        reveal.observe(ids);

        self.subscriptions
            .push(reveal.activations().subscribe(move |id| {
                if let Some(el) = elements.get(id.0 as usize) {
                    dom::set_class(el, ACTIVE_CLASS, true);
                }
            }));
        self.reveals.push(reveal);
        self.observers.push(observer);
        Ok(())
    }

    fn mount_home(&mut self, root: &web::Element, env: &Env) {
        let document = self.document.clone();
        overlay::render_invitation_kind(&document, env.walima_only);

        // countdown
        let target = if env.walima_only {
            WALIMA_START
        } else {
            FULL_CELEBRATION_START
        };
        let countdown = CountdownClock::mount(local_target_ms(target), env.clock(), env.scheduler());
        overlay::render_countdown(&document, countdown.current());
        let doc = document.clone();
        self.subscriptions
            .push(countdown.updates().subscribe(move |left| overlay::render_countdown(&doc, *left)));
        self.countdown = Some(countdown);

        // hero parallax
        overlay::render_parallax(&document, hero_parallax_offset(ScrollSource::current().scroll_y));
        let doc = document.clone();
        let sub = self
            .scroll_source()
            .feed()
            .subscribe(move |ev| overlay::render_parallax(&doc, hero_parallax_offset(ev.scroll_y)));
        self.subscriptions.push(sub);

        // ambient field
        let mut rng = StdRng::seed_from_u64(rand::random());
        overlay::render_ambient(&document, &ambient_field(&mut rng, AMBIENT_COUNT));

        // particles
        let celebration = Rc::new(Celebration::new(
            ParticleEmitter::new(rand::random()),
            env.clock(),
            env.scheduler(),
            env.viewport(),
        ));
        let doc = document.clone();
        self.subscriptions
            .push(celebration.changes().subscribe(move |ps| overlay::render_particles(&doc, ps)));

        let quick = Rc::new(QuickRsvp::new(env.book(), celebration.clone(), env.scheduler()));
        overlay::render_quick_rsvp(&document, false);
        let doc = document.clone();
        self.subscriptions
            .push(quick.changes().subscribe(move |ack| overlay::render_quick_rsvp(&doc, *ack)));

        self.listeners
            .extend(pointer::wire_quick_rsvp(&document, quick.clone()));
        self.listeners
            .extend(pointer::wire_rise(&document, celebration.clone()));
        self.quick_rsvp = Some(quick);
        self.celebration = Some(celebration);

        // AI-backed sections
        self.story = Some(StoryPanel::mount(&document, root, env.ai.clone()));
        self.rsvp_form = Some(RsvpForm::mount(&document, Rc::new(env.book()), env.ai.clone()));
    }

    fn mount_events(&mut self, root: &web::Element, env: &Env) -> anyhow::Result<()> {
        let document = self.document.clone();

        // timeline stem
        match document.get_element_by_id(TIMELINE_ID) {
            Some(region) => {
                let tracker =
                    TimelineProgressTracker::new(env.viewport(), Rc::new(ElementProbe::new(region)));
                let scroll = self.scroll_source().feed().clone();
                let timeline = MountedTimeline::mount(tracker, &scroll);
                overlay::render_timeline_fill(&document, timeline.progress());
                let doc = document.clone();
                self.subscriptions
                    .push(timeline.updates().subscribe(move |p| overlay::render_timeline_fill(&doc, *p)));
                self.timeline = Some(timeline);
            }
            None => log::warn!("[timeline] no #{} on the events page", TIMELINE_ID),
        }

        // highlighted cards
        let cards: Vec<(web::Element, usize)> =
            dom::query_all(root, &format!(".{}", TIMELINE_CARD_CLASS))
                .into_iter()
                .enumerate()
                .map(|(pos, el)| {
                    let index = query::parse_data_index(el.get_attribute(DATA_INDEX_ATTR).as_deref())
                        .unwrap_or(pos);
                    (el, index)
                })
                .collect();
        if !cards.is_empty() {
            let config = ObserverConfig::timeline_active();
            let observer = DomObserver::new(&config)?;
            let active = MountedActiveSet::mount(ActiveSet::new(config), observer.feed());
            let ids = observer.observe(cards.iter().map(|(el, _)| el.clone()));
            for (id, (_, index)) in ids.into_iter().zip(&cards) {
                active.register(id, *index);
            }
            self.subscriptions
                .push(active.updates().subscribe(move |indices| overlay::render_active_cards(&cards, indices)));
            self.active_cards = Some(active);
            self.observers.push(observer);
        }

        self.listeners.extend(pointer::wire_link_buttons(root));
        self.venue = Some(VenueIntelPanel::mount(&document, env.ai.clone()));
        Ok(())
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        if let Some(c) = &self.countdown {
            c.unmount();
        }
        if let Some(q) = &self.quick_rsvp {
            q.unmount();
        }
        if let Some(c) = &self.celebration {
            c.unmount();
        }
        overlay::render_particles(&self.document, &[]);
        overlay::lock_scroll(&self.document, false);
        log::info!("[page] unmounted {}", self.route.name());
    }
}
