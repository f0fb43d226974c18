use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use places::PlacesError;
use serde::Deserialize;

use crate::places_client::get_client;

#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    pub name: String,
}

/// Streams a place photo to the browser. The API key never leaves the host.
pub async fn place_photo(Query(query): Query<PhotoQuery>) -> Response {
    let client = match get_client() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!("photo requested without a places client: {}", e);
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };

    match client.photo(&query.name).await {
        Ok(photo) => (
            [
                (header::CONTENT_TYPE, photo.content_type),
                (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
            ],
            photo.bytes,
        )
            .into_response(),
        Err(PlacesError::InvalidPhotoName(name)) => {
            tracing::warn!(%name, "rejected photo request");
            StatusCode::BAD_REQUEST.into_response()
        }
        Err(e) => {
            tracing::error!(name = %query.name, "photo fetch failed: {}", e);
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
