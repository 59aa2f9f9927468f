//! Car Inventory Search Endpoint

use crate::models::CarListing;
use super::{routes, ApiError, Gateway};

impl Gateway {
    pub async fn search_cars(&self, query: &str) -> Result<Vec<CarListing>, ApiError> {
        self.get_json(&routes::search_cars(query)).await
    }
}
