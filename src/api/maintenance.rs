//! Maintenance Endpoints

use crate::models::ApiMessage;
use super::{routes, ApiError, Gateway};

impl Gateway {
    /// Ask the backend to re-scrape the yards
    pub async fn refresh_database(&self) -> Result<ApiMessage, ApiError> {
        let response = self.request("POST", &routes::refresh_database(), None).await?;
        Self::read_json(&response).await
    }
}
