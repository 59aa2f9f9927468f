//! Mutation Dispatcher
//!
//! Sends completion toggles and patches the rendered rows in place
//! with whatever the server echoed, without re-fetching the board.

use std::collections::HashMap;

use leptos::prelude::*;

use crate::api::{ApiError, Gateway};
use crate::console;
use crate::models::{Completion, CompletionKey};

const TAG: &str = "DISPATCH";

/// Something a rendered row exposes so its completed state can be patched
pub trait RowHandle {
    fn set_completed(&self, completed: bool);
}

impl RowHandle for RwSignal<bool> {
    fn set_completed(&self, completed: bool) {
        // Rows from a replaced board are already disposed
        let _ = self.try_set(completed);
    }
}

/// Backend call behind a checkbox toggle
pub trait CompletionSender {
    async fn send_completion(&self, key: &CompletionKey, completed: bool) -> Result<Completion, ApiError>;
}

impl CompletionSender for Gateway {
    async fn send_completion(&self, key: &CompletionKey, completed: bool) -> Result<Completion, ApiError> {
        self.set_completed(key, completed).await
    }
}

/// Rendered rows, keyed by their composite identity.
/// Several rows may share a key (row-keyed yards list one entry per model).
pub struct RowRegistry<H> {
    rows: HashMap<CompletionKey, Vec<H>>,
}

impl<H> Default for RowRegistry<H> {
    fn default() -> Self {
        Self { rows: HashMap::new() }
    }
}

impl<H: RowHandle> RowRegistry<H> {
    /// Forget every row; called before the board re-renders
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn register(&mut self, key: CompletionKey, handle: H) {
        self.rows.entry(key).or_default().push(handle);
    }

    /// Set every row matching `key`; returns how many were patched
    pub fn apply(&self, key: &CompletionKey, completed: bool) -> usize {
        let Some(handles) = self.rows.get(key) else {
            return 0;
        };
        for handle in handles {
            handle.set_completed(completed);
        }
        handles.len()
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}

/// Registry of the rows currently on the scavenger board
pub type BoardRows = StoredValue<RowRegistry<RwSignal<bool>>>;

/// How a toggle ended
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// Server answered; this many rows now show its value
    Patched(usize),
    /// Server answered but the board was unmounted meanwhile
    BoardGone,
    /// Request failed; nothing patched
    Failed(ApiError),
}

/// Toggle handler for a row checkbox.
///
/// On failure nothing is rolled back: the checkbox keeps the state the
/// click gave it while the row class keeps the last confirmed state.
pub async fn toggle_completion<S, H>(
    sender: &S,
    rows: StoredValue<RowRegistry<H>>,
    key: CompletionKey,
    checked: bool,
) -> ToggleOutcome
where
    S: CompletionSender,
    H: RowHandle + Send + Sync + 'static,
{
    console::log(TAG, &format!("PUT {} completed={}", key.data_attr(), checked));
    match sender.send_completion(&key, checked).await {
        Ok(echo) => match rows.try_with_value(|r| r.apply(&key, echo.completed)) {
            Some(patched) => {
                console::log(TAG, &format!("Updated {}: completed={}, {} row(s) patched", key.data_attr(), echo.completed, patched));
                ToggleOutcome::Patched(patched)
            }
            None => {
                console::log(TAG, &format!("Updated {} after the board was closed", key.data_attr()));
                ToggleOutcome::BoardGone
            }
        },
        Err(e) => {
            console::error(TAG, &format!("Error updating row {}: {}", key.data_attr(), e));
            console::warn(TAG, &format!("{} may not match the server until the next reload", key.data_attr()));
            ToggleOutcome::Failed(e)
        }
    }
}
