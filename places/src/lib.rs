// Google Places / Geocoding access and the request pacing used for background lookups.

pub mod config;
pub mod error;
pub mod geocoding;
pub mod google_places;
pub mod lookup_queue;
pub mod rate_limit;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "client")]
pub use client::{GooglePlacesClient, PlacePhoto};
pub use config::PlacesConfig;
pub use error::PlacesError;
pub use google_places::PHOTO_PROXY_PATH;
pub use lookup_queue::{LookupQueue, LookupTask, QueueSettings, SearchStart, SkipReason, TaskId};
pub use rate_limit::RequestBudget;
