#![cfg(target_arch = "wasm32")]
use crate::pages::{Env, Page};
use crate::query::Route;
use invite_core::loading::LoadingSequence;
use invite_core::services::InvitationAi;
use invite_core::Subscription;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod gemini;
mod geo;
mod observe;
mod overlay;
mod pages;
mod platform;
mod query;

thread_local! {
    static CURRENT: RefCell<Option<Page>> = const { RefCell::new(None) };
    static LOADING: RefCell<Option<(LoadingSequence, Subscription)>> = const { RefCell::new(None) };
}

fn current_route() -> Route {
    web::window()
        .and_then(|w| w.location().hash().ok())
        .map(|h| Route::from_hash(&h))
        .unwrap_or(Route::Home)
}

/// Swap the mounted page for `route`. The old page is torn down first so
/// two pages never observe the DOM at once.
fn navigate(env: &Env, route: Route) {
    let same = CURRENT.with(|c| c.borrow().as_ref().map(|p| p.route()) == Some(route));
    if same {
        return;
    }
    drop(CURRENT.with(|c| c.borrow_mut().take()));

    match Page::mount(route, env) {
        Ok(page) => CURRENT.with(|c| *c.borrow_mut() = Some(page)),
        Err(e) => log::error!("[page] mount {} failed: {:?}", route.name(), e),
    }
    if let Some(w) = web::window() {
        w.scroll_to_with_x_and_y(0.0, 0.0);
    }
    overlay::focus_main(&env.document);
}

fn wire_navigation(window: &web::Window, env: &Rc<Env>) {
    if let Some(root) = env.document.document_element() {
        for button in dom::query_all(&root, &format!("[{}]", constants::NAV_ATTR)) {
            let Some(route) = button
                .get_attribute(constants::NAV_ATTR)
                .and_then(|name| Route::from_name(&name))
            else {
                continue;
            };
            let closure = Closure::wrap(Box::new(move |ev: web::Event| {
                ev.prevent_default();
                if let Some(w) = web::window() {
                    _ = w.location().set_hash(&route.hash());
                }
            }) as Box<dyn FnMut(_)>);
            _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    let env_hash = env.clone();
    let on_hash = Closure::wrap(Box::new(move || {
        navigate(&env_hash, current_route());
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("hashchange", on_hash.as_ref().unchecked_ref());
    on_hash.forget();

    let on_hide = Closure::wrap(Box::new(move || {
        drop(CURRENT.with(|c| c.borrow_mut().take()));
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("invite-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let search = window
        .location()
        .search()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let walima_only = query::is_walima_only(&search, constants::INVITE_PARAM, constants::WALIMA_VALUE);
    if walima_only {
        log::info!("[invite] walima-only invitation");
    }

    let scheduler = Rc::new(platform::BrowserScheduler::new());
    let env = Rc::new(Env {
        document: document.clone(),
        ai: Rc::new(InvitationAi::new(gemini::FetchTransport::from_build_env())),
        store: Rc::new(platform::LocalStore::open()),
        clock: Rc::new(platform::BrowserClock),
        scheduler: scheduler.clone(),
        viewport: Rc::new(platform::BrowserViewport),
        walima_only,
    });
    wire_navigation(&window, &env);

    let env_done = env.clone();
    let sequence = LoadingSequence::mount(
        scheduler,
        Box::new(move || {
            overlay::hide_loading(&env_done.document);
            navigate(&env_done, current_route());
        }),
    );
    overlay::render_loading(&document, sequence.state());
    let doc = document.clone();
    let sub = sequence
        .updates()
        .subscribe(move |state| overlay::render_loading(&doc, *state));
    LOADING.with(|l| *l.borrow_mut() = Some((sequence, sub)));

    Ok(())
}
