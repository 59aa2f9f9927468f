//! Yard Scout Frontend App
//!
//! Header with the database refresh, a tab bar and the active panel.

use leptos::prelude::*;

use crate::components::{CarSearch, RefreshButton, SavedVehiclesPanel, YardBoard};
use crate::context::{AppConfig, AppContext};

/// Panel selection
#[derive(Clone, Copy, Debug, PartialEq)]
enum Panel {
    Scavenger,
    SavedVehicles,
    CarSearch,
}

impl Panel {
    const ALL: [Panel; 3] = [Panel::Scavenger, Panel::SavedVehicles, Panel::CarSearch];

    fn label(self) -> &'static str {
        match self {
            Panel::Scavenger => "Scavenger Hunt",
            Panel::SavedVehicles => "Saved Vehicles",
            Panel::CarSearch => "Car Search",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (yards_reload, set_yards_reload) = signal(0u32);
    let (current_panel, set_current_panel) = signal(Panel::Scavenger);

    // Provide context to all children
    provide_context(AppContext::new(AppConfig::from_document(), (yards_reload, set_yards_reload)));

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Yard Scout"</h1>
                <RefreshButton />
            </header>

            <nav class="panel-tab-bar">
                {Panel::ALL.iter().map(|panel| {
                    let panel = *panel;
                    view! {
                        <button
                            class=move || if current_panel.get() == panel { "panel-tab active" } else { "panel-tab" }
                            on:click=move |_| set_current_panel.set(panel)
                        >
                            {panel.label()}
                        </button>
                    }
                }).collect_view()}
            </nav>

            <main class="main-content">
                {move || match current_panel.get() {
                    Panel::Scavenger => view! { <YardBoard /> }.into_any(),
                    Panel::SavedVehicles => view! { <SavedVehiclesPanel /> }.into_any(),
                    Panel::CarSearch => view! { <CarSearch /> }.into_any(),
                }}
            </main>
        </div>
    }
}
