//! Browser-backed implementations of the engine's platform traits.

use fnv::FnvHashMap;
use invite_core::{
    Clock, KeyValueStore, Rect, RegionProbe, Scheduler, StoreError, TimerHandle, Viewport,
    ViewportSize,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

/// `setTimeout` / `setInterval` on `window`.
///
/// Timeout closures are handed to JS with `once_into_js` and free themselves
/// after running. Interval closures are owned here until cancelled.
#[derive(Default)]
pub struct BrowserScheduler {
    intervals: Rc<RefCell<FnvHashMap<i32, Closure<dyn FnMut()>>>>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn delay_ms(d: Duration) -> i32 {
        d.as_millis().min(i32::MAX as u128) as i32
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
        let Some(window) = web::window() else {
            return TimerHandle(0);
        };
        let callback = Closure::once_into_js(move || task());
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            Self::delay_ms(delay),
        ) {
            Ok(id) => TimerHandle(id as u64),
            Err(e) => {
                log::error!("[timer] setTimeout failed: {:?}", e);
                TimerHandle(0)
            }
        }
    }

    fn set_interval(&self, period: Duration, task: Box<dyn FnMut()>) -> TimerHandle {
        let Some(window) = web::window() else {
            return TimerHandle(0);
        };
        let closure = Closure::wrap(task);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            Self::delay_ms(period).max(1),
        ) {
            Ok(id) => {
                self.intervals.borrow_mut().insert(id, closure);
                TimerHandle(id as u64)
            }
            Err(e) => {
                log::error!("[timer] setInterval failed: {:?}", e);
                TimerHandle(0)
            }
        }
    }

    fn cancel(&self, handle: TimerHandle) {
        let Some(window) = web::window() else {
            return;
        };
        let id = handle.0 as i32;
        // Browsers share one id space for timeouts and intervals.
        window.clear_timeout_with_handle(id);
        window.clear_interval_with_handle(id);
        if let Some(closure) = self.intervals.borrow_mut().remove(&id) {
            // The interval may be cancelling itself from inside its own body;
            // release the closure on a later turn of the event loop.
            let release = Closure::once_into_js(move || drop(closure));
            _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(release.unchecked_ref(), 0);
        }
    }
}

pub struct BrowserViewport;

impl Viewport for BrowserViewport {
    fn size(&self) -> ViewportSize {
        let Some(w) = web::window() else {
            return ViewportSize::default();
        };
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        ViewportSize::new(dim(w.inner_width()), dim(w.inner_height()))
    }
}

/// Bounding rectangle of a live element; `None` once it leaves the document.
pub struct ElementProbe {
    element: web::Element,
}

impl ElementProbe {
    pub fn new(element: web::Element) -> Self {
        Self { element }
    }
}

impl RegionProbe for ElementProbe {
    fn rect(&self) -> Option<Rect> {
        if !self.element.is_connected() {
            return None;
        }
        let r = self.element.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }
}

/// `window.localStorage`, tolerating private-mode browsers that refuse it.
pub struct LocalStore {
    storage: Option<web::Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[storage] localStorage unavailable");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage.set_item(key, value).map_err(|_| StoreError::Rejected {
            key: key.to_string(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage.remove_item(key).map_err(|_| StoreError::Rejected {
            key: key.to_string(),
        })
    }
}
