//! UI Components
//!
//! Leptos components for each panel.

mod yard_board;
mod saved_vehicles;
mod car_search;
mod refresh_button;

pub use yard_board::YardBoard;
pub use saved_vehicles::SavedVehiclesPanel;
pub use car_search::CarSearch;
pub use refresh_button::RefreshButton;
