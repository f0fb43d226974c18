// Request bodies and response parsing for the Google Places API (New).

use serde_json::{json, Value};
use shared_types::{LatLong, PlaceSummary, Rating};

pub const NEARBY_SEARCH_URL: &str = "https://places.googleapis.com/v1/places:searchNearby";
pub const PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";

pub const NEARBY_FIELD_MASK: &str =
    "places.id,places.displayName,places.formattedAddress,places.shortFormattedAddress,places.location,places.rating,places.photos.name";
pub const DETAILS_FIELD_MASK: &str = "reviews.rating,reviews.text";

pub const PHOTO_MAX_WIDTH_PX: u32 = 400;

/// Body for a `places:searchNearby` call restricted to restaurants within `radius_m` of `center`.
pub fn nearby_request_body(center: LatLong, radius_m: f64, max_results: u8) -> Value {
    json!({
        "includedTypes": ["restaurant"],
        "maxResultCount": max_results,
        "locationRestriction": {
            "circle": {
                "center": {
                    "latitude": center.lat,
                    "longitude": center.long
                },
                "radius": radius_m
            }
        }
    })
}

pub fn details_url(place_id: &str) -> String {
    format!("{PLACES_BASE_URL}/places/{}", urlencoding::encode(place_id))
}

/// Host route that streams place photos. The API key is added on the server.
pub const PHOTO_PROXY_PATH: &str = "/place-photo";

/// True for resource names of the form `places/{place}/photos/{photo}`.
pub fn is_photo_name(photo_name: &str) -> bool {
    let segments: Vec<&str> = photo_name.split('/').collect();
    matches!(
        segments.as_slice(),
        ["places", place, "photos", photo]
            if [place, photo].iter().all(|s| {
                !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            })
    )
}

/// Upstream media URL for a photo. Callers authenticate with the `X-Goog-Api-Key` header.
pub fn photo_media_url(photo_name: &str) -> String {
    format!("{PLACES_BASE_URL}/{photo_name}/media?maxWidthPx={PHOTO_MAX_WIDTH_PX}")
}

/// Keyless, same-origin URL the browser loads the photo from.
pub fn photo_proxy_url(photo_name: &str) -> String {
    format!("{PHOTO_PROXY_PATH}?name={}", urlencoding::encode(photo_name))
}

/// Parse a nearby-search response. Entries without an id or a location are dropped.
pub fn parse_nearby_response(value: &Value) -> Vec<PlaceSummary> {
    let places = match value.get("places").and_then(|p| p.as_array()) {
        Some(p) => p,
        None => return Vec::new(),
    };

    places
        .iter()
        .filter_map(convert_place)
        .collect()
}

fn convert_place(val: &Value) -> Option<PlaceSummary> {
    let place_id = val.get("id").and_then(Value::as_str)?.to_string();
    let location = val.get("location")?;
    let lat = location.get("latitude").and_then(Value::as_f64)?;
    let long = location.get("longitude").and_then(Value::as_f64)?;

    // Nearby search only gives the short address reliably, the vicinity equivalent.
    let address = val
        .get("shortFormattedAddress")
        .or_else(|| val.get("formattedAddress"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let image_url = val
        .get("photos")
        .and_then(Value::as_array)
        .and_then(|photos| photos.first())
        .and_then(|photo| photo.get("name"))
        .and_then(Value::as_str)
        .filter(|name| is_photo_name(name))
        .map(photo_proxy_url);

    Some(PlaceSummary {
        place_id,
        name: extract_string(&val["displayName"]["text"]),
        address,
        location: LatLong::new(lat, long),
        rating: val.get("rating").and_then(Value::as_f64).map(|r| r as f32),
        image_url,
    })
}

/// Reviews from a details response. Reviews without a star rating are skipped.
pub fn parse_reviews(value: &Value) -> Vec<Rating> {
    value
        .get("reviews")
        .and_then(Value::as_array)
        .map(|reviews| {
            reviews
                .iter()
                .filter_map(|review| {
                    let stars = review.get("rating").and_then(Value::as_f64)? as f32;
                    let comment = review
                        .get("text")
                        .and_then(|text| text.get("text"))
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    Some(Rating::new(stars, comment))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn extract_string(val: &Value) -> String {
    val.as_str().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_body_targets_restaurants_around_center() {
        let body = nearby_request_body(LatLong::new(38.72, -9.13), 200.0, 20);
        assert_eq!(body["includedTypes"], json!(["restaurant"]));
        assert_eq!(body["maxResultCount"], json!(20));
        assert_eq!(
            body["locationRestriction"]["circle"]["center"]["latitude"],
            json!(38.72)
        );
        assert_eq!(body["locationRestriction"]["circle"]["radius"], json!(200.0));
    }

    #[test]
    fn parses_nearby_places() {
        let response = json!({
            "places": [
                {
                    "id": "ChIJ1",
                    "displayName": { "text": "O Velho Eurico", "languageCode": "pt" },
                    "shortFormattedAddress": "Largo de São Cristóvão 3, Lisboa",
                    "formattedAddress": "Largo de São Cristóvão 3, 1100-179 Lisboa, Portugal",
                    "location": { "latitude": 38.7129, "longitude": -9.1357 },
                    "rating": 4.6,
                    "photos": [{ "name": "places/ChIJ1/photos/AX1" }]
                },
                {
                    "id": "ChIJ2",
                    "displayName": { "text": "Sem Foto" },
                    "formattedAddress": "Rua X",
                    "location": { "latitude": 38.71, "longitude": -9.14 }
                },
                {
                    "displayName": { "text": "No id" },
                    "location": { "latitude": 1.0, "longitude": 1.0 }
                }
            ]
        });

        let places = parse_nearby_response(&response);
        assert_eq!(places.len(), 2);

        let first = &places[0];
        assert_eq!(first.place_id, "ChIJ1");
        assert_eq!(first.name, "O Velho Eurico");
        assert_eq!(first.address, "Largo de São Cristóvão 3, Lisboa");
        assert_eq!(first.location, LatLong::new(38.7129, -9.1357));
        assert!((first.rating.unwrap() - 4.6).abs() < 1e-6);
        assert_eq!(
            first.image_url.as_deref(),
            Some("/place-photo?name=places%2FChIJ1%2Fphotos%2FAX1")
        );

        let second = &places[1];
        assert_eq!(second.address, "Rua X");
        assert_eq!(second.rating, None);
        assert_eq!(second.image_url, None);
    }

    #[test]
    fn empty_or_malformed_nearby_response_yields_nothing() {
        assert!(parse_nearby_response(&json!({})).is_empty());
        assert!(parse_nearby_response(&json!({ "places": "nope" })).is_empty());
    }

    #[test]
    fn parses_reviews_from_details() {
        let response = json!({
            "reviews": [
                { "rating": 5, "text": { "text": "Excellent bacalhau" } },
                { "rating": 3 },
                { "text": { "text": "no stars" } }
            ]
        });
        assert_eq!(
            parse_reviews(&response),
            vec![Rating::new(5.0, "Excellent bacalhau"), Rating::new(3.0, "")]
        );
        assert!(parse_reviews(&json!({})).is_empty());
    }

    #[test]
    fn details_url_escapes_place_id() {
        assert_eq!(
            details_url("ab/c"),
            "https://places.googleapis.com/v1/places/ab%2Fc"
        );
    }

    #[test]
    fn photo_urls_never_carry_the_api_key() {
        let response = json!({
            "places": [{
                "id": "X",
                "displayName": { "text": "Tasca" },
                "location": { "latitude": 38.7, "longitude": -9.1 },
                "photos": [{ "name": "places/X/photos/P" }]
            }]
        });

        let image_url = parse_nearby_response(&response)[0].image_url.clone().unwrap();
        assert_eq!(image_url, "/place-photo?name=places%2FX%2Fphotos%2FP");
        assert!(!image_url.contains("key="));
        assert_eq!(
            photo_media_url("places/X/photos/P"),
            "https://places.googleapis.com/v1/places/X/photos/P/media?maxWidthPx=400"
        );
    }

    #[test]
    fn only_place_photo_names_are_accepted() {
        assert!(is_photo_name("places/ChIJ1/photos/AX1-_b"));
        assert!(!is_photo_name("places/ChIJ1"));
        assert!(!is_photo_name("places/../photos/P"));
        assert!(!is_photo_name("places/X/photos/P/media"));
        assert!(!is_photo_name("places//photos/P"));
        assert!(!is_photo_name("https://evil.example/photos/P"));
    }
}
