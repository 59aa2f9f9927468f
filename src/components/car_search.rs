//! Car Search Panel
//!
//! Searches the scraped inventory. Clearing the search puts back the
//! listing markup the host page was served with, untouched.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::Gateway;
use crate::console;
use crate::context::use_app_context;
use crate::models::CarListing;

const TAG: &str = "CARS";

/// Host page `<template>` holding the server-rendered listing
pub const ORIGINAL_LISTINGS_ID: &str = "car-listings";

/// What the listings area shows
#[derive(Clone, Debug, PartialEq)]
pub enum CarView {
    /// Markup captured from the host page
    Original(String),
    Results(Vec<CarListing>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CarSearchState {
    original: String,
    view: CarView,
}

impl CarSearchState {
    pub fn new(original: String) -> Self {
        Self { view: CarView::Original(original.clone()), original }
    }

    pub fn view(&self) -> &CarView {
        &self.view
    }

    pub fn show_results(&mut self, cars: Vec<CarListing>) {
        self.view = CarView::Results(cars);
    }

    pub fn clear(&mut self) {
        self.view = CarView::Original(self.original.clone());
    }
}

fn original_listings_markup() -> String {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(ORIGINAL_LISTINGS_ID))
        .map(|el| el.inner_html())
        .unwrap_or_default()
}

/// Car search panel
#[component]
pub fn CarSearch() -> impl IntoView {
    let ctx = use_app_context();
    let gateway = StoredValue::new(Gateway::new(ctx.config()));
    let state = RwSignal::new(CarSearchState::new(original_listings_markup()));
    let (query, set_query) = signal(String::new());

    let search = move || {
        let q = query.get_untracked();
        let gateway = gateway.get_value();
        spawn_local(async move {
            match gateway.search_cars(&q).await {
                Ok(cars) => {
                    console::log(TAG, &format!("Search '{}' matched {} cars", q, cars.len()));
                    if state.try_update(|s| s.show_results(cars)).is_none() {
                        console::log(TAG, "Panel closed before search results arrived");
                    }
                }
                Err(e) => console::error(TAG, &format!("Error searching cars: {}", e)),
            }
        });
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            search();
        }
    };

    let on_clear = move |_| {
        set_query.set(String::new());
        state.update(|s| s.clear());
    };

    let listings = move || match state.with(|s| s.view().clone()) {
        CarView::Original(markup) => view! { <div class="car-listings-original" inner_html=markup></div> }.into_any(),
        CarView::Results(cars) if cars.is_empty() => view! { <p>"No cars found."</p> }.into_any(),
        CarView::Results(cars) => view! {
            <table class="table table-striped">
                <thead>
                    <tr>
                        <th>"Year"</th>
                        <th>"Make"</th>
                        <th>"Model"</th>
                        <th>"Row"</th>
                        <th>"Date"</th>
                        <th>"Yard"</th>
                    </tr>
                </thead>
                <tbody>
                    {cars.into_iter().map(|car| view! {
                        <tr>
                            <td>{car.year.to_string()}</td>
                            <td>{car.make}</td>
                            <td>{car.model}</td>
                            <td>{car.row.to_string()}</td>
                            <td>{car.date}</td>
                            <td>{car.yard}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        }.into_any(),
    };

    view! {
        <section class="car-search">
            <div class="search-row">
                <input
                    id="searchInput"
                    type="text"
                    placeholder="Search cars (press Enter)..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button on:click=move |_| search()>"Search"</button>
                <button on:click=on_clear>"Clear"</button>
            </div>
            <div id="carListings" class="car-listings">
                {listings}
            </div>
        </section>
    }
}
