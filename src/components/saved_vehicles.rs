//! Saved Vehicles Panel
//!
//! Create, list, edit, delete and search saved search criteria.
//! The fetched list lives in component-local store state and is
//! refetched after every mutation.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::{ApiError, Gateway};
use crate::console;
use crate::context::use_app_context;
use crate::models::{find_saved_vehicle, ApiMessage, SavedVehicle, SavedVehicleFields};

const TAG: &str = "SAVED";

/// Panel state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct SavedVehiclesState {
    /// Last full fetch; only used to look vehicles up by id for editing
    pub cache: Vec<SavedVehicle>,
    /// What the list shows: the full fetch or search results
    pub shown: Vec<SavedVehicle>,
    /// Vehicle open in the edit dialog
    pub editing_id: Option<u32>,
}

/// Form inputs shared by the create form and the edit dialog
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Field {
    Make,
    Model,
    MinYear,
    MaxYear,
    Part,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Make, Field::Model, Field::MinYear, Field::MaxYear, Field::Part];

    pub fn label(self) -> &'static str {
        match self {
            Field::Make => "Make",
            Field::Model => "Model",
            Field::MinYear => "Min Year",
            Field::MaxYear => "Max Year",
            Field::Part => "Part",
        }
    }

    /// Element id suffix, e.g. `minYear` / `editMinYear`
    pub fn id(self, prefix: &str) -> String {
        let base = match self {
            Field::Make => "make",
            Field::Model => "model",
            Field::MinYear => "minYear",
            Field::MaxYear => "maxYear",
            Field::Part => "part",
        };
        if prefix.is_empty() {
            base.to_string()
        } else {
            let mut chars = base.chars();
            let first = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
            format!("{}{}{}", prefix, first, chars.as_str())
        }
    }

    pub fn get(self, fields: &SavedVehicleFields) -> &str {
        match self {
            Field::Make => &fields.make,
            Field::Model => &fields.model,
            Field::MinYear => &fields.min_year,
            Field::MaxYear => &fields.max_year,
            Field::Part => &fields.part,
        }
    }

    pub fn set(self, fields: &mut SavedVehicleFields, value: String) {
        match self {
            Field::Make => fields.make = value,
            Field::Model => fields.model = value,
            Field::MinYear => fields.min_year = value,
            Field::MaxYear => fields.max_year = value,
            Field::Part => fields.part = value,
        }
    }
}

/// Result of submitting the edit dialog
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditOutcome {
    Updated,
    Failed,
}

impl EditOutcome {
    /// Success requires a `message` in the reply
    pub fn from_reply(reply: &Result<ApiMessage, ApiError>) -> Self {
        match reply {
            Ok(ApiMessage { message: Some(_) }) => EditOutcome::Updated,
            _ => EditOutcome::Failed,
        }
    }

    pub fn alert_text(self) -> &'static str {
        match self {
            EditOutcome::Updated => "Vehicle updated successfully!",
            EditOutcome::Failed => "Failed to update vehicle!",
        }
    }
}

fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

/// Backend calls behind the panel
pub trait SavedVehicleApi {
    async fn fetch_all(&self) -> Result<Vec<SavedVehicle>, ApiError>;
    async fn create(&self, fields: &SavedVehicleFields) -> Result<SavedVehicle, ApiError>;
    async fn update(&self, id: u32, fields: &SavedVehicleFields) -> Result<ApiMessage, ApiError>;
    async fn delete(&self, id: u32) -> Result<(), ApiError>;
    async fn search(&self, query: &str) -> Result<Vec<SavedVehicle>, ApiError>;
}

impl SavedVehicleApi for Gateway {
    async fn fetch_all(&self) -> Result<Vec<SavedVehicle>, ApiError> {
        self.fetch_saved_vehicles().await
    }

    async fn create(&self, fields: &SavedVehicleFields) -> Result<SavedVehicle, ApiError> {
        self.create_saved_vehicle(fields).await
    }

    async fn update(&self, id: u32, fields: &SavedVehicleFields) -> Result<ApiMessage, ApiError> {
        self.update_saved_vehicle(id, fields).await
    }

    async fn delete(&self, id: u32) -> Result<(), ApiError> {
        self.delete_saved_vehicle(id).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SavedVehicle>, ApiError> {
        self.search_saved_vehicles(query).await
    }
}

/// Full refetch; replaces both the cache and the shown list.
/// Returns false when the panel was closed before the reply.
pub async fn refresh_list<A: SavedVehicleApi>(api: &A, state: Store<SavedVehiclesState>) -> bool {
    match api.fetch_all().await {
        Ok(all) => {
            console::log(TAG, &format!("Loaded {} saved vehicles", all.len()));
            let stored = state.try_update(|s| {
                s.cache = all.clone();
                s.shown = all;
            });
            if stored.is_none() {
                console::log(TAG, "Panel closed before saved vehicles arrived");
            }
            stored.is_some()
        }
        Err(e) => {
            console::error(TAG, &format!("Error fetching saved vehicles: {}", e));
            false
        }
    }
}

pub async fn create_and_refresh<A: SavedVehicleApi>(api: &A, state: Store<SavedVehiclesState>, fields: SavedVehicleFields) {
    if let Err(e) = api.create(&fields).await {
        console::error(TAG, &format!("Error saving vehicle: {}", e));
    }
    refresh_list(api, state).await;
}

pub async fn delete_and_refresh<A: SavedVehicleApi>(api: &A, state: Store<SavedVehiclesState>, id: u32) {
    if let Err(e) = api.delete(id).await {
        console::error(TAG, &format!("Error deleting vehicle {}: {}", id, e));
    }
    refresh_list(api, state).await;
}

pub async fn submit_edit<A: SavedVehicleApi>(api: &A, id: u32, fields: &SavedVehicleFields) -> EditOutcome {
    let reply = api.update(id, fields).await;
    if let Err(e) = &reply {
        console::error(TAG, &format!("Error updating vehicle {}: {}", id, e));
    }
    EditOutcome::from_reply(&reply)
}

/// Show search results; the cache keeps the last full fetch
pub async fn search_into<A: SavedVehicleApi>(api: &A, state: Store<SavedVehiclesState>, query: &str) {
    match api.search(query).await {
        Ok(found) => {
            let _ = state.try_update(|s| s.shown = found);
        }
        Err(e) => console::error(TAG, &format!("Error searching vehicles: {}", e)),
    }
}

/// Saved vehicles panel
#[component]
pub fn SavedVehiclesPanel() -> impl IntoView {
    let ctx = use_app_context();
    let gateway = StoredValue::new(Gateway::new(ctx.config()));
    let state = Store::new(SavedVehiclesState::default());
    let new_form = RwSignal::new(SavedVehicleFields::default());
    let edit_form = RwSignal::new(SavedVehicleFields::default());
    let (search_text, set_search_text) = signal(String::new());

    let reload = move || {
        let gateway = gateway.get_value();
        spawn_local(async move {
            refresh_list(&gateway, state).await;
        });
    };

    // Initial load
    Effect::new(move |_| {
        reload();
    });

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let fields = new_form.get();
        let gateway = gateway.get_value();
        new_form.set(SavedVehicleFields::default());
        spawn_local(async move {
            create_and_refresh(&gateway, state, fields).await;
        });
    };

    let on_delete = move |id: u32| {
        let gateway = gateway.get_value();
        spawn_local(async move {
            delete_and_refresh(&gateway, state, id).await;
        });
    };

    let on_edit = move |id: u32| {
        let found = state.cache().with(|cache| find_saved_vehicle(cache, id).map(SavedVehicle::to_fields));
        match found {
            Some(fields) => {
                edit_form.set(fields);
                state.editing_id().set(Some(id));
            }
            None => console::warn(TAG, &format!("Vehicle {} is not in the cached list", id)),
        }
    };

    let on_update = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = state.editing_id().get() else { return; };
        let fields = edit_form.get();
        let gateway = gateway.get_value();
        spawn_local(async move {
            let outcome = submit_edit(&gateway, id, &fields).await;
            alert(outcome.alert_text());
            if outcome == EditOutcome::Updated {
                if state.try_update(|s| s.editing_id = None).is_some() {
                    refresh_list(&gateway, state).await;
                }
            }
        });
    };

    let on_search = move || {
        let query = search_text.get_untracked();
        let gateway = gateway.get_value();
        spawn_local(async move {
            search_into(&gateway, state, &query).await;
        });
    };

    let on_clear = move |_| {
        set_search_text.set(String::new());
        reload();
    };

    view! {
        <section class="saved-vehicles">
            <form id="carFilterForm" class="car-filter-form" on:submit=on_create>
                <FieldInputs form=new_form id_prefix="" />
                <button type="submit">"Save"</button>
            </form>

            <div class="search-row">
                <input
                    id="searchBar"
                    type="text"
                    placeholder="Search saved vehicles..."
                    prop:value=move || search_text.get()
                    on:input=move |ev| set_search_text.set(event_target_value(&ev))
                />
                <button on:click=move |_| on_search()>"Search"</button>
                <button on:click=on_clear>"Clear"</button>
            </div>

            <div id="storedData" class="stored-data">
                <For
                    each=move || state.shown().get()
                    key=|v| (v.id, v.label(), v.part.clone())
                    children=move |v| {
                        let id = v.id;
                        view! {
                            <div class="stored-item">
                                <div>
                                    <span>{v.label()}</span>
                                    <span>{format!("Part: {}", v.part)}</span>
                                    <button class="edit-btn" on:click=move |_| on_edit(id)>
                                        <img src="/static/assets/editbutton.jpg" alt="edit" />
                                    </button>
                                    <button class="delete-btn" on:click=move |_| on_delete(id)>
                                        <img src="/static/assets/deletebutton.png" alt="delete" />
                                    </button>
                                </div>
                            </div>
                        }
                    }
                />
            </div>

            <Show when=move || state.editing_id().get().is_some()>
                <div id="editVehicleModal" class="modal-backdrop">
                    <form id="editVehicleForm" class="modal-dialog" on:submit=on_update>
                        <h3>"Edit Vehicle"</h3>
                        <FieldInputs form=edit_form id_prefix="edit" />
                        <div class="modal-actions">
                            <button type="submit">"Save changes"</button>
                            <button type="button" on:click=move |_| state.editing_id().set(None)>"Cancel"</button>
                        </div>
                    </form>
                </div>
            </Show>
        </section>
    }
}

/// The five text inputs bound to a form signal
#[component]
fn FieldInputs(form: RwSignal<SavedVehicleFields>, id_prefix: &'static str) -> impl IntoView {
    Field::ALL
        .iter()
        .map(|field| {
            let field = *field;
            view! {
                <label class="field">
                    <span>{field.label()}</span>
                    <input
                        id=field.id(id_prefix)
                        type="text"
                        prop:value=move || form.with(|f| field.get(f).to_string())
                        on:input=move |ev| form.update(|f| field.set(f, event_target_value(&ev)))
                    />
                </label>
            }
        })
        .collect_view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use futures::executor::block_on;
    use leptos::reactive::owner::Owner;

    fn saved(id: u32, model: &str) -> SavedVehicle {
        SavedVehicle {
            id,
            make: "Ford".to_string(),
            model: model.to_string(),
            min_year: None,
            max_year: None,
            part: "tailgate".to_string(),
        }
    }

    /// In-memory backend recording every call
    struct FakeApi {
        vehicles: Mutex<Vec<SavedVehicle>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn with(vehicles: Vec<SavedVehicle>) -> Self {
            Self { vehicles: Mutex::new(vehicles), calls: Mutex::new(Vec::new()) }
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SavedVehicleApi for FakeApi {
        async fn fetch_all(&self) -> Result<Vec<SavedVehicle>, ApiError> {
            self.record("fetch".to_string());
            Ok(self.vehicles.lock().unwrap().clone())
        }

        async fn create(&self, fields: &SavedVehicleFields) -> Result<SavedVehicle, ApiError> {
            self.record(format!("create {}", fields.model));
            let mut vehicles = self.vehicles.lock().unwrap();
            let created = saved(vehicles.len() as u32 + 100, &fields.model);
            vehicles.push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: u32, _fields: &SavedVehicleFields) -> Result<ApiMessage, ApiError> {
            self.record(format!("update {}", id));
            Ok(ApiMessage { message: Some("Vehicle updated".to_string()) })
        }

        async fn delete(&self, id: u32) -> Result<(), ApiError> {
            self.record(format!("delete {}", id));
            self.vehicles.lock().unwrap().retain(|v| v.id != id);
            Ok(())
        }

        async fn search(&self, query: &str) -> Result<Vec<SavedVehicle>, ApiError> {
            self.record(format!("search {}", query));
            Ok(self.vehicles.lock().unwrap().iter().filter(|v| v.model.to_lowercase().contains(query)).cloned().collect())
        }
    }

    #[test]
    fn test_delete_removes_one_and_refetches() {
        let owner = Owner::new();
        let api = FakeApi::with(vec![saved(1, "Ranger"), saved(2, "Focus"), saved(3, "Escape")]);
        let state = owner.with(|| Store::new(SavedVehiclesState::default()));
        assert!(block_on(refresh_list(&api, state)));
        assert_eq!(state.get_untracked().cache.len(), 3);

        block_on(delete_and_refresh(&api, state, 2));

        assert_eq!(api.calls(), vec!["fetch", "delete 2", "fetch"]);
        let ids: Vec<u32> = state.get_untracked().cache.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(state.get_untracked().shown.len(), 2);
    }

    #[test]
    fn test_create_refetches() {
        let owner = Owner::new();
        let api = FakeApi::with(vec![saved(1, "Ranger")]);
        let state = owner.with(|| Store::new(SavedVehiclesState::default()));
        let fields = SavedVehicleFields { model: "Bronco".to_string(), ..Default::default() };

        block_on(create_and_refresh(&api, state, fields));

        assert_eq!(api.calls(), vec!["create Bronco", "fetch"]);
        assert_eq!(state.get_untracked().cache.len(), 2);
    }

    #[test]
    fn test_search_leaves_cache_alone() {
        let owner = Owner::new();
        let api = FakeApi::with(vec![saved(1, "Ranger"), saved(2, "Focus")]);
        let state = owner.with(|| Store::new(SavedVehiclesState::default()));
        block_on(refresh_list(&api, state));

        block_on(search_into(&api, state, "focus"));

        let current = state.get_untracked();
        assert_eq!(current.cache.len(), 2);
        assert_eq!(current.shown.iter().map(|v| v.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_edit_submit_reports_outcome() {
        let api = FakeApi::with(vec![saved(1, "Ranger")]);
        let outcome = block_on(submit_edit(&api, 1, &SavedVehicleFields::default()));
        assert_eq!(outcome, EditOutcome::Updated);
        assert_eq!(api.calls(), vec!["update 1"]);
    }

    #[test]
    fn test_reply_after_panel_closed_does_not_panic() {
        let owner = Owner::new();
        let api = FakeApi::with(vec![saved(1, "Ranger"), saved(2, "Focus")]);
        let state = owner.with(|| Store::new(SavedVehiclesState::default()));
        owner.cleanup();

        assert!(!block_on(refresh_list(&api, state)));
        block_on(delete_and_refresh(&api, state, 1));
        block_on(search_into(&api, state, "focus"));
        assert_eq!(api.calls(), vec!["fetch", "delete 1", "fetch", "search focus"]);
    }

    #[test]
    fn test_field_ids_match_form_markup() {
        assert_eq!(Field::MinYear.id(""), "minYear");
        assert_eq!(Field::MinYear.id("edit"), "editMinYear");
        assert_eq!(Field::Part.id("edit"), "editPart");
    }

    #[test]
    fn test_field_get_set() {
        let mut fields = SavedVehicleFields::default();
        for (i, field) in Field::ALL.iter().enumerate() {
            field.set(&mut fields, format!("v{}", i));
        }
        assert_eq!(fields.make, "v0");
        assert_eq!(fields.max_year, "v3");
        assert_eq!(Field::Part.get(&fields), "v4");
    }

    #[test]
    fn test_edit_outcome_needs_message() {
        let ok = Ok(ApiMessage { message: Some("Vehicle updated".to_string()) });
        assert_eq!(EditOutcome::from_reply(&ok), EditOutcome::Updated);

        let no_message = Ok(ApiMessage { message: None });
        assert_eq!(EditOutcome::from_reply(&no_message), EditOutcome::Failed);

        let failed = Err(ApiError::Network("offline".to_string()));
        assert_eq!(EditOutcome::from_reply(&failed), EditOutcome::Failed);
        assert_eq!(EditOutcome::Failed.alert_text(), "Failed to update vehicle!");
    }
}
