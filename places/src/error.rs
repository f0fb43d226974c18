use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("GOOGLE_PLACES_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid value for {name}: {value:?}")]
    InvalidConfig { name: &'static str, value: String },

    #[cfg(feature = "client")]
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Http { status: u16, body: String },

    /// Non-OK `status` field in an otherwise successful response.
    #[error("{0}")]
    UpstreamStatus(String),

    /// Photo names must look like `places/{place}/photos/{photo}`.
    #[error("invalid photo name {0:?}")]
    InvalidPhotoName(String),

    #[error("no results found")]
    NoResults,

    #[error("request budget of {capacity} calls exhausted until {resets_at}")]
    BudgetExhausted {
        capacity: u32,
        resets_at: DateTime<Utc>,
    },
}
