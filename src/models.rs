//! Frontend Models
//!
//! Data structures matching backend payloads.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Scalar the backend sends either as a JSON number or a JSON string.
/// Rows are stored as strings server-side, years usually as numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FlexText(String);

impl FlexText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlexText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FlexText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlexVisitor;

        impl<'de> Visitor<'de> for FlexVisitor {
            type Value = FlexText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or a number")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FlexText, E> {
                Ok(FlexText(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FlexText, E> {
                Ok(FlexText(v.to_string()))
            }

            // JS numbers arrive as f64; 1968.0 must read as "1968"
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<FlexText, E> {
                if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
                    Ok(FlexText((v as i64).to_string()))
                } else {
                    Ok(FlexText(v.to_string()))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FlexText, E> {
                Ok(FlexText(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<FlexText, E> {
                Ok(FlexText(v))
            }
        }

        deserializer.deserialize_any(FlexVisitor)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<FlexText>),
    One(FlexText),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FlexText>, D::Error> {
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(all) => all,
        OneOrMany::One(single) => vec![single],
    })
}

// ========================
// Scavenger Hunt
// ========================

/// A hunt target parked in a yard row.
///
/// Accepts both payload revisions: `years` + `models`, or flat
/// `year` + `make` + `model`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vehicle {
    pub row: FlexText,
    #[serde(alias = "year", deserialize_with = "one_or_many", default)]
    pub years: Vec<FlexText>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(alias = "models", default)]
    pub model: String,
    #[serde(default)]
    pub completed: bool,
}

impl Vehicle {
    /// Identity used for the PUT route, row registration and reconciliation.
    /// Vehicles that carry a make are keyed by the full tuple, the rest by row.
    pub fn completion_key(&self, yard: &str) -> CompletionKey {
        // The vehicle route needs every segment; anything less is row-keyed
        let vehicle = match (&self.make, self.years.first()) {
            (Some(make), Some(year)) => Some(VehicleIdent {
                make: make.clone(),
                model: self.model.clone(),
                year: year.as_str().to_string(),
            }),
            _ => None,
        };
        CompletionKey {
            yard: yard.to_string(),
            row: self.row.as_str().to_string(),
            vehicle,
        }
    }

    pub fn row_label(&self) -> String {
        format!("Row: {}", self.row)
    }

    /// "1968 Camaro", "1999, 2000 Ford Ranger"
    pub fn label(&self) -> String {
        let years = self.years.iter().map(FlexText::as_str).collect::<Vec<_>>().join(", ");
        [years.as_str(), self.make.as_deref().unwrap_or(""), self.model.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleIdent {
    pub make: String,
    pub model: String,
    pub year: String,
}

/// Composite identity of a rendered row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompletionKey {
    pub yard: String,
    pub row: String,
    pub vehicle: Option<VehicleIdent>,
}

impl CompletionKey {
    pub fn for_row(yard: impl Into<String>, row: impl Into<String>) -> Self {
        Self { yard: yard.into(), row: row.into(), vehicle: None }
    }

    pub fn for_vehicle(
        yard: impl Into<String>,
        row: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            yard: yard.into(),
            row: row.into(),
            vehicle: Some(VehicleIdent { make: make.into(), model: model.into(), year: year.into() }),
        }
    }

    /// Value for the row's `data-row-key` attribute
    pub fn data_attr(&self) -> String {
        match &self.vehicle {
            Some(v) => format!("{}/{}/{}/{}/{}", self.yard, self.row, v.make, v.model, v.year),
            None => format!("{}/{}", self.yard, self.row),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Yard {
    #[serde(rename = "hotWheelsCount", default)]
    pub hot_wheels_count: u32,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
}

/// Yard name -> yard, in the order the server listed them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YardListing {
    pub yards: Vec<(String, Yard)>,
}

impl YardListing {
    pub fn len(&self) -> usize {
        self.yards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.yards.is_empty()
    }
}

impl<'de> Deserialize<'de> for YardListing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListingVisitor;

        impl<'de> Visitor<'de> for ListingVisitor {
            type Value = YardListing;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of yard name to yard")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<YardListing, A::Error> {
                let mut yards = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, yard)) = map.next_entry::<String, Yard>()? {
                    yards.push((name, yard));
                }
                Ok(YardListing { yards })
            }
        }

        deserializer.deserialize_map(ListingVisitor)
    }
}

/// Body sent and echoed by the completion endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub completed: bool,
}

/// Age filter for the scavenger board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Days(u32),
}

impl DayFilter {
    pub const PRESETS: [DayFilter; 4] = [DayFilter::All, DayFilter::Days(1), DayFilter::Days(3), DayFilter::Days(7)];

    pub fn label(&self) -> String {
        match self {
            DayFilter::All => "All".to_string(),
            DayFilter::Days(1) => "1 day".to_string(),
            DayFilter::Days(n) => format!("{} days", n),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Days(n) => write!(f, "{}", n),
        }
    }
}

// ========================
// Saved Vehicles
// ========================

/// Saved search criterion (matches backend)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedVehicle {
    pub id: u32,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(rename = "minYear", default)]
    pub min_year: Option<FlexText>,
    #[serde(rename = "maxYear", default)]
    pub max_year: Option<FlexText>,
    #[serde(default)]
    pub part: String,
}

impl SavedVehicle {
    /// "1990 - 1995 Ford Ranger"; missing years render empty
    pub fn label(&self) -> String {
        let year = |y: &Option<FlexText>| y.as_ref().map(|t| t.as_str().to_string()).unwrap_or_default();
        format!("{} - {} {} {}", year(&self.min_year), year(&self.max_year), self.make, self.model)
    }

    /// Form values for the edit dialog
    pub fn to_fields(&self) -> SavedVehicleFields {
        SavedVehicleFields {
            make: self.make.clone(),
            model: self.model.clone(),
            min_year: self.min_year.as_ref().map(|y| y.as_str().to_string()).unwrap_or_default(),
            max_year: self.max_year.as_ref().map(|y| y.as_str().to_string()).unwrap_or_default(),
            part: self.part.clone(),
        }
    }
}

pub fn find_saved_vehicle(vehicles: &[SavedVehicle], id: u32) -> Option<&SavedVehicle> {
    vehicles.iter().find(|v| v.id == id)
}

/// Create/update payload; years stay as typed in the form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SavedVehicleFields {
    pub make: String,
    pub model: String,
    #[serde(rename = "minYear")]
    pub min_year: String,
    #[serde(rename = "maxYear")]
    pub max_year: String,
    pub part: String,
}

/// Reply of endpoints that answer with a status message
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

// ========================
// Car Search
// ========================

/// One scraped car as returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarListing {
    #[serde(default)]
    pub year: FlexText,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub row: FlexText,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub yard: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_legacy_yard_payload() {
        let json = r#"{"YardA": {"hotWheelsCount": 2, "vehicles": [{"row":1,"years":[1968],"models":"Camaro","completed":false}]}}"#;
        let listing: YardListing = serde_json::from_str(json).unwrap();

        assert_eq!(listing.len(), 1);
        let (name, yard) = &listing.yards[0];
        assert_eq!(name, "YardA");
        assert_eq!(yard.hot_wheels_count, 2);
        assert_eq!(yard.vehicles.len(), 1);

        let vehicle = &yard.vehicles[0];
        assert_eq!(vehicle.row_label(), "Row: 1");
        assert_eq!(vehicle.label(), "1968 Camaro");
        assert!(!vehicle.completed);
        assert_eq!(vehicle.completion_key("YardA"), CompletionKey::for_row("YardA", "1"));
    }

    #[test]
    fn test_decode_revised_vehicle_payload() {
        let json = r#"{"row":"12","year":1999,"make":"Ford","model":"Ranger","completed":true}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();

        assert_eq!(vehicle.label(), "1999 Ford Ranger");
        assert!(vehicle.completed);
        assert_eq!(
            vehicle.completion_key("Pick N Pull"),
            CompletionKey::for_vehicle("Pick N Pull", "12", "Ford", "Ranger", "1999")
        );
    }

    #[test]
    fn test_make_without_year_is_row_keyed() {
        let json = r#"{"row":"4","make":"Ford","model":"Ranger"}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.completion_key("YardA"), CompletionKey::for_row("YardA", "4"));
    }

    #[test]
    fn test_completion_body() {
        let body = serde_json::to_string(&Completion { completed: true }).unwrap();
        assert_eq!(body, r#"{"completed":true}"#);
        let echo: Completion = serde_json::from_str(r#"{"completed":false}"#).unwrap();
        assert!(!echo.completed);
    }

    #[test]
    fn test_multiple_years_joined() {
        let json = r#"{"row":3,"years":[1999,2000],"models":"Civic"}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.label(), "1999, 2000 Civic");
        assert!(!vehicle.completed);
    }

    #[test]
    fn test_yard_order_follows_server() {
        let json = r#"{"Zed": {"hotWheelsCount": 0, "vehicles": []}, "Alpha": {"hotWheelsCount": 1, "vehicles": []}}"#;
        let listing: YardListing = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = listing.yards.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Alpha"]);
        assert_eq!(listing.yards[1].1.hot_wheels_count, 1);
        assert_eq!(listing.len(), 2);
    }

    #[test]
    fn test_data_attr() {
        assert_eq!(CompletionKey::for_row("A", "4").data_attr(), "A/4");
        assert_eq!(CompletionKey::for_vehicle("A", "4", "Ford", "F150", "1990").data_attr(), "A/4/Ford/F150/1990");
    }

    #[test]
    fn test_day_filter_query_value() {
        assert_eq!(DayFilter::All.to_string(), "all");
        assert_eq!(DayFilter::Days(7).to_string(), "7");
        assert_eq!(DayFilter::Days(1).label(), "1 day");
        assert_eq!(DayFilter::Days(3).label(), "3 days");
    }

    #[test]
    fn test_saved_vehicle_label() {
        let json = r#"{"id":5,"make":"Ford","model":"Ranger","minYear":1990,"maxYear":"1995","part":"tailgate"}"#;
        let saved: SavedVehicle = serde_json::from_str(json).unwrap();
        assert_eq!(saved.label(), "1990 - 1995 Ford Ranger");

        let json = r#"{"id":6,"make":"Honda","model":"Civic","minYear":null,"part":"mirror"}"#;
        let saved: SavedVehicle = serde_json::from_str(json).unwrap();
        assert_eq!(saved.label(), " -  Honda Civic");
        assert_eq!(saved.to_fields().min_year, "");
    }

    #[test]
    fn test_find_saved_vehicle() {
        let make = |id: u32| SavedVehicle {
            id,
            make: "Ford".to_string(),
            model: format!("Model {}", id),
            min_year: None,
            max_year: None,
            part: "door".to_string(),
        };
        let cache = vec![make(1), make(2), make(3)];
        assert_eq!(find_saved_vehicle(&cache, 2).map(|v| v.model.as_str()), Some("Model 2"));
        assert!(find_saved_vehicle(&cache, 9).is_none());
    }

    #[test]
    fn test_fields_serialize_camel_case() {
        let fields = SavedVehicleFields {
            make: "Ford".into(),
            model: "Ranger".into(),
            min_year: "1990".into(),
            max_year: "1995".into(),
            part: "tailgate".into(),
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["minYear"], "1990");
        assert_eq!(json["maxYear"], "1995");
    }

    #[test]
    fn test_car_listing_row_as_string() {
        let json = r#"{"year":"2004","make":"Toyota","model":"Camry","row":"B7","date":"2024-03-01","yard":"TAP"}"#;
        let car: CarListing = serde_json::from_str(json).unwrap();
        assert_eq!(car.row.as_str(), "B7");
        assert_eq!(car.year.as_str(), "2004");
    }
}
