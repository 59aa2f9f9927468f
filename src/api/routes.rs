//! API Routes
//!
//! Path builders for every backend endpoint. Each dynamic component is
//! encoded the way `encodeURIComponent` does it.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::models::{CompletionKey, DayFilter};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT_ENCODE_SET).to_string()
}

pub fn scavenger_filtered(filter: DayFilter) -> String {
    format!("/api/scavenger_filtered?days={}", encode_component(&filter.to_string()))
}

pub fn row_completion(yard: &str, row: &str) -> String {
    format!("/api/scavenger_yards/{}/rows/{}", encode_component(yard), encode_component(row))
}

pub fn vehicle_completion(yard: &str, row: &str, make: &str, model: &str, year: &str) -> String {
    format!(
        "{}/vehicles/{}/{}/{}",
        row_completion(yard, row),
        encode_component(make),
        encode_component(model),
        encode_component(year)
    )
}

/// Row route for row-keyed vehicles, vehicle route for fully keyed ones
pub fn completion(key: &CompletionKey) -> String {
    match &key.vehicle {
        Some(v) => vehicle_completion(&key.yard, &key.row, &v.make, &v.model, &v.year),
        None => row_completion(&key.yard, &key.row),
    }
}

pub fn saved_vehicles() -> String {
    "/api/saved_vehicles".to_string()
}

pub fn saved_vehicle(id: u32) -> String {
    format!("/api/saved_vehicles/{}", id)
}

pub fn search_vehicles(query: &str) -> String {
    format!("/api/search_vehicles?query={}", encode_component(query))
}

pub fn search_cars(query: &str) -> String {
    format!("/api/search_cars?query={}", encode_component(query))
}

pub fn refresh_database() -> String {
    "/api/refresh_database".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_encode_uri_component() {
        assert_eq!(encode_component("Pick N Pull"), "Pick%20N%20Pull");
        assert_eq!(encode_component("A/B&C?"), "A%2FB%26C%3F");
        assert_eq!(encode_component("it's-(ok)_~*.!"), "it's-(ok)_~*.!");
        assert_eq!(encode_component("Citroën"), "Citro%C3%ABn");
    }

    #[test]
    fn test_filtered_route() {
        assert_eq!(scavenger_filtered(DayFilter::All), "/api/scavenger_filtered?days=all");
        assert_eq!(scavenger_filtered(DayFilter::Days(7)), "/api/scavenger_filtered?days=7");
    }

    #[test]
    fn test_row_key_uses_row_route() {
        let key = CompletionKey::for_row("Pick N Pull", "12");
        assert_eq!(completion(&key), "/api/scavenger_yards/Pick%20N%20Pull/rows/12");
    }

    #[test]
    fn test_vehicle_key_uses_vehicle_route() {
        let key = CompletionKey::for_vehicle("TAP", "3", "Mercedes-Benz", "C 230", "1999");
        assert_eq!(
            completion(&key),
            "/api/scavenger_yards/TAP/rows/3/vehicles/Mercedes-Benz/C%20230/1999"
        );
    }

    #[test]
    fn test_search_routes_encode_query() {
        assert_eq!(search_cars(""), "/api/search_cars?query=");
        assert_eq!(search_cars("f-150 & more"), "/api/search_cars?query=f-150%20%26%20more");
        assert_eq!(search_vehicles("ford"), "/api/search_vehicles?query=ford");
        assert_eq!(saved_vehicle(42), "/api/saved_vehicles/42");
    }
}
