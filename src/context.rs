//! Application Context
//!
//! Startup configuration and shared signals provided via Leptos Context API.

use leptos::prelude::*;

use crate::models::DayFilter;

/// Meta tag on the host page carrying the API base URL
pub const API_BASE_META: &str = "yard-scout-api-base";

/// Settings read once from the host page
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppConfig {
    /// Prefix for every `/api/...` path; empty means same origin
    pub api_base: String,
    /// Filter used for the first board load
    pub default_filter: DayFilter,
}

impl AppConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: normalize_base(&api_base.into()),
            default_filter: DayFilter::All,
        }
    }

    /// Read `<meta name="yard-scout-api-base" content="...">`, falling back to same origin
    pub fn from_document() -> Self {
        let base = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.query_selector(&format!("meta[name=\"{}\"]", API_BASE_META)).ok().flatten())
            .and_then(|meta| meta.get_attribute("content"))
            .unwrap_or_default();
        Self::new(base)
    }

    /// Absolute or same-origin URL for an `/api/...` path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Startup configuration
    pub config: StoredValue<AppConfig>,
    /// Trigger to reload yards from backend - read
    pub yards_reload: ReadSignal<u32>,
    /// Trigger to reload yards from backend - write
    set_yards_reload: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(config: AppConfig, yards_reload: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            config: StoredValue::new(config),
            yards_reload: yards_reload.0,
            set_yards_reload: yards_reload.1,
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Trigger a reload of the scavenger board
    pub fn reload_yards(&self) {
        let _ = self.set_yards_reload.try_update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
