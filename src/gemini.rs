//! `fetch`-based transport for the Gemini `generateContent` REST call.

use crate::constants::{GEMINI_API_KEY, GEMINI_ENDPOINT};
use invite_core::services::GenerativeTransport;
use invite_core::ServiceError;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct FetchTransport {
    api_key: Option<String>,
}

impl FetchTransport {
    pub fn from_build_env() -> Self {
        if GEMINI_API_KEY.is_none() {
            log::warn!("[ai] GEMINI_API_KEY not set at build time; AI features will fall back");
        }
        Self {
            api_key: GEMINI_API_KEY.map(str::to_string),
        }
    }
}

fn js_err(e: JsValue) -> ServiceError {
    ServiceError::Transport(format!("{:?}", e))
}

impl GenerativeTransport for FetchTransport {
    async fn generate(&self, model: &str, body: &Value) -> Result<String, ServiceError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::Transport("no API key".to_string()))?;
        let window = web::window().ok_or_else(|| ServiceError::Transport("no window".to_string()))?;

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_ENDPOINT,
            model,
            urlencoding::encode(key)
        );
        let init = web::RequestInit::new();
        init.set_method("POST");
        init.set_mode(web::RequestMode::Cors);
        init.set_body(&JsValue::from_str(&body.to_string()));
        let request = web::Request::new_with_str_and_init(&url, &init).map_err(js_err)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_err)?;

        let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        if !response.ok() {
            return Err(ServiceError::Status(response.status()));
        }
        let text = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        text.as_string().ok_or(ServiceError::Empty)
    }
}
