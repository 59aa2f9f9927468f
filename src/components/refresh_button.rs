//! Refresh Database Button
//!
//! Asks the backend to re-scrape, shows the outcome and reloads the board.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, Gateway};
use crate::console;
use crate::context::use_app_context;
use crate::models::ApiMessage;

const TAG: &str = "REFRESH";

pub const REFRESH_PENDING: &str = "Refreshing database... Please wait.";
pub const REFRESH_FAILED: &str = "Error updating database.";

/// Status text for a finished refresh, and whether yards should reload
pub fn refresh_status(reply: &Result<ApiMessage, ApiError>) -> (String, bool) {
    match reply {
        Ok(reply) => (reply.message.clone().unwrap_or_default(), true),
        Err(_) => (REFRESH_FAILED.to_string(), false),
    }
}

#[component]
pub fn RefreshButton() -> impl IntoView {
    let ctx = use_app_context();
    let gateway = StoredValue::new(Gateway::new(ctx.config()));
    let (status, set_status) = signal(String::new());

    let on_refresh = move |_| {
        set_status.set(REFRESH_PENDING.to_string());
        let gateway = gateway.get_value();
        spawn_local(async move {
            let reply = gateway.refresh_database().await;
            if let Err(e) = &reply {
                console::error(TAG, &format!("Error refreshing database: {}", e));
            }
            let (text, reload) = refresh_status(&reply);
            if set_status.try_set(text).is_some() {
                console::log(TAG, "Header closed before the refresh finished");
                return;
            }
            if reload {
                ctx.reload_yards();
            }
        });
    };

    view! {
        <div class="refresh-database">
            <button class="refresh-btn" on:click=on_refresh>
                "Refresh Database"
            </button>
            <span id="statusMessage" class="status-message">{move || status.get()}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shows_message_and_reloads() {
        let reply = Ok(ApiMessage { message: Some("Database updated successfully".to_string()) });
        assert_eq!(refresh_status(&reply), ("Database updated successfully".to_string(), true));
    }

    #[test]
    fn test_failure_shows_error_text() {
        let reply = Err(ApiError::Server { status: 500, status_text: "Internal Server Error".to_string() });
        assert_eq!(refresh_status(&reply), (REFRESH_FAILED.to_string(), false));
    }
}
