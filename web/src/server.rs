use leptos::prelude::*;
use leptos::server;
use shared_types::{LatLong, PlaceSummary, Rating};

#[cfg(feature = "ssr")]
use crate::places_client::get_client;
#[cfg(feature = "ssr")]
use places::PlacesError;

#[server]
pub async fn nearby_restaurants(center: LatLong) -> Result<Vec<PlaceSummary>, ServerFnError> {
    let client = get_client().map_err(|e| ServerFnError::new(e.to_string()))?;
    match client.search_nearby(center).await {
        Ok(places) => Ok(places),
        Err(e) => {
            tracing::error!("nearby search failed: {}", e);
            Err(ServerFnError::new(format!("Nearby search failed: {}", e)))
        }
    }
}

#[server]
pub async fn place_reviews(place_id: String) -> Result<Vec<Rating>, ServerFnError> {
    let client = get_client().map_err(|e| ServerFnError::new(e.to_string()))?;
    match client.place_reviews(&place_id).await {
        Ok(reviews) => Ok(reviews),
        Err(e) => {
            tracing::error!(%place_id, "place details failed: {}", e);
            Err(ServerFnError::new(format!("Place details failed: {}", e)))
        }
    }
}

/// `Ok(None)` when the point has no address; other failures carry the upstream status.
#[server]
pub async fn reverse_geocode(point: LatLong) -> Result<Option<String>, ServerFnError> {
    let client = get_client().map_err(|e| ServerFnError::new(e.to_string()))?;
    match client.reverse_geocode(point).await {
        Ok(address) => Ok(Some(address)),
        Err(PlacesError::NoResults) => Ok(None),
        Err(e) => {
            tracing::error!("reverse geocode failed: {}", e);
            Err(ServerFnError::new(e.to_string()))
        }
    }
}
