#[cfg(feature = "ssr")]
use places::{GooglePlacesClient, PlacesError};
#[cfg(feature = "ssr")]
use std::sync::OnceLock;

#[cfg(feature = "ssr")]
static PLACES_CLIENT: OnceLock<GooglePlacesClient> = OnceLock::new();

#[cfg(feature = "ssr")]
pub fn init_client() -> Result<(), PlacesError> {
    let client = GooglePlacesClient::from_env()?;
    tracing::debug!(
        radius_m = client.config().search_radius_m,
        max_results = client.config().max_results,
        "places client configured"
    );

    if PLACES_CLIENT.set(client).is_err() {
        tracing::warn!("Places client already initialized");
    }

    Ok(())
}

#[cfg(feature = "ssr")]
pub fn get_client() -> Result<&'static GooglePlacesClient, PlacesError> {
    PLACES_CLIENT.get().ok_or(PlacesError::MissingApiKey)
}
