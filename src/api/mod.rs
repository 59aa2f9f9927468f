//! Remote Data Gateway
//!
//! Frontend bindings to the backend JSON API, organized by domain.
//! Every call issues exactly one request and decodes the reply verbatim.

mod scavenger;
mod saved_vehicles;
mod cars;
mod maintenance;
pub mod routes;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::context::AppConfig;

/// Failure of a single API call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The fetch promise rejected or the request could not be built
    #[error("network failure: {0}")]
    Network(String),
    /// Non-2xx response
    #[error("server error {status}: {status_text}")]
    Server { status: u16, status_text: String },
    /// Reply did not have the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    fn network(err: JsValue) -> Self {
        ApiError::Network(describe_js_error(&err))
    }
}

fn describe_js_error(err: &JsValue) -> String {
    if let Some(js_err) = err.dyn_ref::<js_sys::Error>() {
        return String::from(js_err.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Map a response status to `Ok` for 2xx, `ApiError::Server` otherwise
pub fn check_status(ok: bool, status: u16, status_text: &str) -> Result<(), ApiError> {
    if ok {
        Ok(())
    } else {
        Err(ApiError::Server { status, status_text: status_text.to_string() })
    }
}

/// Writes declare a JSON body even when they carry none
pub fn sends_json(method: &str, has_body: bool) -> bool {
    has_body || matches!(method, "POST" | "PUT")
}

/// Client for the backend API
#[derive(Clone, Debug, PartialEq)]
pub struct Gateway {
    config: AppConfig,
}

impl Gateway {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<Response, ApiError> {
        let url = self.config.url(path);
        let opts = RequestInit::new();
        opts.set_method(method);
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&url, &opts).map_err(ApiError::network)?;
        if sends_json(method, body.is_some()) {
            request.headers().set("Content-Type", "application/json").map_err(ApiError::network)?;
        }

        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
        let reply = JsFuture::from(window.fetch_with_request(&request)).await.map_err(ApiError::network)?;
        reply
            .dyn_into::<Response>()
            .map_err(|_| ApiError::Decode(format!("{} {} did not return a Response", method, url)))
    }

    async fn read_json<T: DeserializeOwned>(response: &Response) -> Result<T, ApiError> {
        let promise = response.json().map_err(|e| ApiError::Decode(describe_js_error(&e)))?;
        let value = JsFuture::from(promise).await.map_err(|e| ApiError::Decode(describe_js_error(&e)))?;
        serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
        serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send and require a 2xx reply, ignoring its body
    async fn request(&self, method: &str, path: &str, body: Option<String>) -> Result<Response, ApiError> {
        let response = self.send(method, path, body).await?;
        check_status(response.ok(), response.status(), &response.status_text())?;
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request("GET", path, None).await?;
        Self::read_json(&response).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(&self, method: &str, path: &str, body: &B) -> Result<T, ApiError> {
        let response = self.request(method, path, Some(Self::encode_body(body)?)).await?;
        Self::read_json(&response).await
    }
}
