use reqwest::{header::HeaderMap, Client};
use serde_json::Value;
use shared_types::{LatLong, PlaceSummary, Rating};

use crate::config::PlacesConfig;
use crate::error::PlacesError;
use crate::geocoding::{parse_reverse_geocode, reverse_geocode_query, GEOCODE_URL};
use crate::google_places::{
    details_url, is_photo_name, nearby_request_body, parse_nearby_response, parse_reviews,
    photo_media_url, DETAILS_FIELD_MASK, NEARBY_FIELD_MASK, NEARBY_SEARCH_URL,
};

/// Image bytes fetched from the Places media endpoint.
#[derive(Debug, Clone)]
pub struct PlacePhoto {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Thin client over the Places and Geocoding web services. It does no pacing of
/// its own; the caller decides when a call is allowed.
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    http: Client,
    config: PlacesConfig,
}

impl GooglePlacesClient {
    pub fn new(config: PlacesConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self, PlacesError> {
        PlacesConfig::from_env().map(Self::new)
    }

    pub fn config(&self) -> &PlacesConfig {
        &self.config
    }

    pub async fn search_nearby(&self, center: LatLong) -> Result<Vec<PlaceSummary>, PlacesError> {
        let body = nearby_request_body(center, self.config.search_radius_m, self.config.max_results);
        let headers = self.headers(Some(NEARBY_FIELD_MASK))?;

        tracing::debug!(lat = center.lat, long = center.long, "nearby search");
        let response = self
            .http
            .post(NEARBY_SEARCH_URL)
            .headers(headers)
            .json(&body)
            .send()
            .await?;
        let value = read_json(response).await?;

        let places = parse_nearby_response(&value);
        tracing::debug!(count = places.len(), "nearby search returned places");
        Ok(places)
    }

    pub async fn place_reviews(&self, place_id: &str) -> Result<Vec<Rating>, PlacesError> {
        let headers = self.headers(Some(DETAILS_FIELD_MASK))?;

        tracing::debug!(place_id, "place details");
        let response = self
            .http
            .get(details_url(place_id))
            .headers(headers)
            .send()
            .await?;
        let value = read_json(response).await?;
        Ok(parse_reviews(&value))
    }

    pub async fn reverse_geocode(&self, point: LatLong) -> Result<String, PlacesError> {
        tracing::debug!(lat = point.lat, long = point.long, "reverse geocode");
        let response = self
            .http
            .get(GEOCODE_URL)
            .query(&reverse_geocode_query(point, &self.config.api_key))
            .send()
            .await?;
        let value = read_json(response).await?;
        parse_reverse_geocode(&value)
    }

    /// Fetches a place photo with the server's key, following the media redirect.
    pub async fn photo(&self, photo_name: &str) -> Result<PlacePhoto, PlacesError> {
        if !is_photo_name(photo_name) {
            return Err(PlacesError::InvalidPhotoName(photo_name.to_string()));
        }
        let headers = self.headers(None)?;

        tracing::debug!(photo_name, "place photo");
        let response = self
            .http
            .get(photo_media_url(photo_name))
            .headers(headers)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await?;
            tracing::error!(status, %body, "places photo error");
            return Err(PlacesError::Http { status, body });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?.to_vec();
        Ok(PlacePhoto {
            content_type,
            bytes,
        })
    }

    fn headers(&self, field_mask: Option<&str>) -> Result<HeaderMap, PlacesError> {
        let invalid = |name: &'static str, value: &str| PlacesError::InvalidConfig {
            name,
            value: value.to_string(),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            "Content-Type",
            "application/json"
                .parse()
                .map_err(|_| invalid("Content-Type", "application/json"))?,
        );
        headers.insert(
            "X-Goog-Api-Key",
            self.config
                .api_key
                .parse()
                .map_err(|_| invalid("GOOGLE_PLACES_API_KEY", "<redacted>"))?,
        );
        if let Some(field_mask) = field_mask {
            headers.insert(
                "X-Goog-FieldMask",
                field_mask
                    .parse()
                    .map_err(|_| invalid("X-Goog-FieldMask", field_mask))?,
            );
        }
        Ok(headers)
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, PlacesError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::error!(status, %body, "places API error");
        return Err(PlacesError::Http { status, body });
    }
    Ok(response.json().await?)
}
