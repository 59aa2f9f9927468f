//! Saved Vehicle Endpoints

use crate::models::{ApiMessage, SavedVehicle, SavedVehicleFields};
use super::{routes, ApiError, Gateway};

impl Gateway {
    pub async fn fetch_saved_vehicles(&self) -> Result<Vec<SavedVehicle>, ApiError> {
        self.get_json(&routes::saved_vehicles()).await
    }

    pub async fn create_saved_vehicle(&self, fields: &SavedVehicleFields) -> Result<SavedVehicle, ApiError> {
        self.send_json("POST", &routes::saved_vehicles(), fields).await
    }

    /// The reply body is decoded whatever the status; callers decide on `message`
    pub async fn update_saved_vehicle(&self, id: u32, fields: &SavedVehicleFields) -> Result<ApiMessage, ApiError> {
        let response = self.send("PUT", &routes::saved_vehicle(id), Some(Self::encode_body(fields)?)).await?;
        Self::read_json(&response).await
    }

    pub async fn delete_saved_vehicle(&self, id: u32) -> Result<(), ApiError> {
        self.request("DELETE", &routes::saved_vehicle(id), None).await?;
        Ok(())
    }

    /// Query is lower-cased before sending
    pub async fn search_saved_vehicles(&self, query: &str) -> Result<Vec<SavedVehicle>, ApiError> {
        self.get_json(&routes::search_vehicles(&query.to_lowercase())).await
    }
}
