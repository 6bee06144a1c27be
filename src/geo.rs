use crate::constants::{GEO_MAX_AGE_MS, GEO_TIMEOUT_MS};
use invite_core::services::GeoPoint;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn coord(position: &JsValue, field: &str) -> Option<f64> {
    let coords = js_sys::Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    js_sys::Reflect::get(&coords, &JsValue::from_str(field))
        .ok()?
        .as_f64()
}

/// Best-effort, low-accuracy position of the guest. Denial, timeout or a
/// browser without geolocation all yield `None`.
pub async fn current_position() -> Option<GeoPoint> {
    let geolocation = web::window()?.navigator().geolocation().ok()?;
    let opts = web::PositionOptions::new();
    opts.set_enable_high_accuracy(false);
    opts.set_timeout(GEO_TIMEOUT_MS);
    opts.set_maximum_age(GEO_MAX_AGE_MS);

    let promise = js_sys::Promise::new(&mut |resolve: js_sys::Function, reject: js_sys::Function| {
        let ok = Closure::once_into_js(move |pos: JsValue| {
            _ = resolve.call1(&JsValue::NULL, &pos);
        });
        let reject_now = reject.clone();
        let err = Closure::once_into_js(move |e: JsValue| {
            _ = reject.call1(&JsValue::NULL, &e);
        });
        if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
            ok.unchecked_ref(),
            Some(err.unchecked_ref()),
            &opts,
        ) {
            _ = reject_now.call1(&JsValue::NULL, &e);
        }
    });

    match JsFuture::from(promise).await {
        Ok(pos) => Some(GeoPoint {
            latitude: coord(&pos, "latitude")?,
            longitude: coord(&pos, "longitude")?,
        }),
        Err(_) => {
            log::info!("[geo] location unavailable, grounding without it");
            None
        }
    }
}
