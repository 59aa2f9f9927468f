//! Scavenger Board Component
//!
//! Yards with collapsible vehicle lists and completion checkboxes.
//! The whole board is replaced on every fetch; open sections are read
//! back from the DOM just before that happens.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_disclosure::{capture_expanded, create_disclosure, make_on_toggle, ExpandedSections};

use crate::api::Gateway;
use crate::console;
use crate::context::use_app_context;
use crate::dispatch::{self, BoardRows, RowRegistry};
use crate::models::{CompletionKey, DayFilter, Vehicle, Yard, YardListing};

const TAG: &str = "BOARD";

/// Class carried by every collapsible vehicle list
pub const SECTION_CLASS: &str = "vehicles-list";

/// Element id of a yard's vehicle list
pub fn section_id(yard_name: &str) -> String {
    format!("yard-{}", yard_name)
}

/// Scavenger board with day filter
#[component]
pub fn YardBoard() -> impl IntoView {
    let ctx = use_app_context();
    let gateway = StoredValue::new(Gateway::new(ctx.config()));
    let (filter, set_filter) = signal(ctx.config().default_filter);
    let (board, set_board) = signal((YardListing::default(), ExpandedSections::default()));
    let rows: BoardRows = StoredValue::new(RowRegistry::default());

    // Load yards on mount, on filter change and on reload requests
    Effect::new(move |_| {
        let trigger = ctx.yards_reload.get();
        let days = filter.get();
        console::log(TAG, &format!("Loading yards, days={}, trigger={}", days, trigger));
        let gateway = gateway.get_value();
        spawn_local(async move {
            match gateway.fetch_yards(days).await {
                Ok(listing) => {
                    let expanded = capture_expanded(SECTION_CLASS);
                    console::log(TAG, &format!("Loaded {} yards, {} expanded", listing.len(), expanded.len()));
                    if listing.is_empty() {
                        console::warn(TAG, &format!("No yards for days={}", days));
                    }
                    if set_board.try_set((listing, expanded)).is_some() {
                        console::log(TAG, "Board closed before yards arrived");
                    }
                }
                Err(e) => console::error(TAG, &format!("Error fetching yards: {}", e)),
            }
        });
    });

    let yards = move || {
        let (listing, expanded) = board.get();
        rows.update_value(|r| r.clear());
        let sections = listing
            .yards
            .into_iter()
            .map(|(name, yard)| {
                let initially_open = expanded.is_expanded(&section_id(&name));
                view! {
                    <YardSection name=name yard=yard initially_open=initially_open rows=rows gateway=gateway />
                }
            })
            .collect_view();
        rows.with_value(|r| console::log(TAG, &format!("Rendered {} rows", r.len())));
        sections
    };

    view! {
        <section class="scavenger-board">
            <div class="filter-bar">
                {DayFilter::PRESETS.iter().map(|preset| {
                    let preset = *preset;
                    view! {
                        <button
                            class=move || if filter.get() == preset { "filter-btn active" } else { "filter-btn" }
                            on:click=move |_| set_filter.set(preset)
                        >
                            {preset.label()}
                        </button>
                    }
                }).collect_view()}
            </div>
            <div id="scavengerContainer" class="scavenger-container">
                {yards}
            </div>
        </section>
    }
}

/// One yard: clickable header plus its vehicle list
#[component]
fn YardSection(
    name: String,
    yard: Yard,
    initially_open: bool,
    rows: BoardRows,
    gateway: StoredValue<Gateway>,
) -> impl IntoView {
    let disclosure = create_disclosure(initially_open);
    let on_toggle = make_on_toggle(disclosure);
    let list_id = section_id(&name);

    let vehicles = yard
        .vehicles
        .into_iter()
        .map(|vehicle| {
            let row_key = vehicle.completion_key(&name);
            view! { <VehicleRow vehicle=vehicle row_key=row_key rows=rows gateway=gateway /> }
        })
        .collect_view();

    view! {
        <div class="yard-section">
            <div class="yard-header" on:click=on_toggle>
                <h2>{name}</h2>
                <span class="hot-wheels-count">{yard.hot_wheels_count}</span>
            </div>
            <div id=list_id class=SECTION_CLASS style:display=move || disclosure.display()>
                {vehicles}
            </div>
        </div>
    }
}

/// A single vehicle row with its completion checkbox
#[component]
fn VehicleRow(
    vehicle: Vehicle,
    row_key: CompletionKey,
    rows: BoardRows,
    gateway: StoredValue<Gateway>,
) -> impl IntoView {
    let completed = RwSignal::new(vehicle.completed);
    rows.update_value(|r| r.register(row_key.clone(), completed));
    let data_key = row_key.data_attr();
    let row_key = StoredValue::new(row_key);

    let on_change = move |ev: web_sys::Event| {
        let checked = event_target_checked(&ev);
        let key = row_key.get_value();
        let gateway = gateway.get_value();
        spawn_local(async move {
            dispatch::toggle_completion(&gateway, rows, key, checked).await;
        });
    };

    view! {
        <div
            class=move || if completed.get() { "vehicle-row completed" } else { "vehicle-row" }
            data-row-key=data_key
        >
            <span class="vehicle-row-number">{vehicle.row_label()}</span>
            <span class="vehicle-models">{vehicle.label()}</span>
            <input
                type="checkbox"
                class="vehicle-checkbox"
                prop:checked=move || completed.get()
                on:change=on_change
            />
        </div>
    }
}
