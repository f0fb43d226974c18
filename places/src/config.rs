use std::env;

use crate::error::PlacesError;

pub const DEFAULT_SEARCH_RADIUS_M: f64 = 200.0;
pub const DEFAULT_MAX_RESULTS: u8 = 20;

/// Settings for the Google web services, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesConfig {
    pub api_key: String,
    pub search_radius_m: f64,
    pub max_results: u8,
}

impl PlacesConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            search_radius_m: DEFAULT_SEARCH_RADIUS_M,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn from_env() -> Result<Self, PlacesError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PlacesError> {
        let api_key = lookup("GOOGLE_PLACES_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(PlacesError::MissingApiKey)?;

        let mut config = Self::new(api_key);

        if let Some(raw) = lookup("PLACES_SEARCH_RADIUS_M") {
            config.search_radius_m = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|radius| *radius > 0.0 && *radius <= 50_000.0)
                .ok_or(PlacesError::InvalidConfig {
                    name: "PLACES_SEARCH_RADIUS_M",
                    value: raw.clone(),
                })?;
        }

        // The nearby endpoint caps results at 20.
        if let Some(raw) = lookup("PLACES_MAX_RESULTS") {
            config.max_results = raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|max| (1..=20).contains(max))
                .ok_or(PlacesError::InvalidConfig {
                    name: "PLACES_MAX_RESULTS",
                    value: raw.clone(),
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_key_is_an_error() {
        let result = PlacesConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(PlacesError::MissingApiKey)));

        let result = PlacesConfig::from_lookup(lookup_from(&[("GOOGLE_PLACES_API_KEY", " ")]));
        assert!(matches!(result, Err(PlacesError::MissingApiKey)));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config =
            PlacesConfig::from_lookup(lookup_from(&[("GOOGLE_PLACES_API_KEY", "abc")])).unwrap();
        assert_eq!(config, PlacesConfig::new("abc"));
        assert_eq!(config.search_radius_m, 200.0);
        assert_eq!(config.max_results, 20);
    }

    #[test]
    fn overrides_are_parsed_and_checked() {
        let config = PlacesConfig::from_lookup(lookup_from(&[
            ("GOOGLE_PLACES_API_KEY", "abc"),
            ("PLACES_SEARCH_RADIUS_M", "500"),
            ("PLACES_MAX_RESULTS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.search_radius_m, 500.0);
        assert_eq!(config.max_results, 5);

        let result = PlacesConfig::from_lookup(lookup_from(&[
            ("GOOGLE_PLACES_API_KEY", "abc"),
            ("PLACES_MAX_RESULTS", "40"),
        ]));
        assert!(matches!(
            result,
            Err(PlacesError::InvalidConfig {
                name: "PLACES_MAX_RESULTS",
                ..
            })
        ));
    }
}
