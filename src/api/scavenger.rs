//! Scavenger Hunt Endpoints

use crate::models::{Completion, CompletionKey, DayFilter, YardListing};
use super::{routes, ApiError, Gateway};

impl Gateway {
    pub async fn fetch_yards(&self, filter: DayFilter) -> Result<YardListing, ApiError> {
        self.get_json(&routes::scavenger_filtered(filter)).await
    }

    pub async fn set_row_completed(&self, yard: &str, row: &str, completed: bool) -> Result<Completion, ApiError> {
        self.set_completed(&CompletionKey::for_row(yard, row), completed).await
    }

    pub async fn set_vehicle_completed(
        &self,
        yard: &str,
        row: &str,
        make: &str,
        model: &str,
        year: &str,
        completed: bool,
    ) -> Result<Completion, ApiError> {
        self.set_completed(&CompletionKey::for_vehicle(yard, row, make, model, year), completed).await
    }

    /// PUT `{completed}` to the route matching the key; returns the server's echo
    pub async fn set_completed(&self, key: &CompletionKey, completed: bool) -> Result<Completion, ApiError> {
        self.send_json("PUT", &routes::completion(key), &Completion { completed }).await
    }
}
