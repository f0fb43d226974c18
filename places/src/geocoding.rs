use serde_json::Value;
use shared_types::LatLong;

use crate::error::PlacesError;

pub const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

pub fn reverse_geocode_query(point: LatLong, api_key: &str) -> Vec<(&'static str, String)> {
    vec![
        ("latlng", format!("{},{}", point.lat, point.long)),
        ("key", api_key.to_string()),
    ]
}

/// First formatted address of a reverse-geocode response.
pub fn parse_reverse_geocode(value: &Value) -> Result<String, PlacesError> {
    let status = value
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN_ERROR");

    match status {
        "OK" => value
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .and_then(|first| first.get("formatted_address"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(PlacesError::NoResults),
        "ZERO_RESULTS" => Err(PlacesError::NoResults),
        other => Err(PlacesError::UpstreamStatus(other.to_string())),
    }
}
