use leptos::logging::error;
use leptos::prelude::*;
use shared_types::Restaurant;

const SEED_RESTAURANTS: &str = include_str!("../data/restaurants.json");

/// In-memory list of every known restaurant for the session. Append-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantStore {
    restaurants: Vec<Restaurant>,
}

impl RestaurantStore {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::new)
    }

    /// The bundled seed dataset. A malformed bundle is logged and yields an empty store.
    pub fn seeded() -> Self {
        match Self::from_json(SEED_RESTAURANTS) {
            Ok(store) => store,
            Err(e) => {
                error!("Failed to parse seed restaurants: {}", e);
                Self::default()
            }
        }
    }

    pub fn list(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn append(&mut self, restaurant: Restaurant) {
        self.restaurants.push(restaurant);
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

/// Reactive handle to the session's [`RestaurantStore`], shared through context.
#[derive(Debug, Clone, Copy)]
pub struct RestaurantRepository {
    inner: RwSignal<RestaurantStore>,
}

impl RestaurantRepository {
    pub fn new(store: RestaurantStore) -> Self {
        Self {
            inner: RwSignal::new(store),
        }
    }

    pub fn provide(store: RestaurantStore) -> Self {
        let repository = Self::new(store);
        provide_context(repository);
        repository
    }

    pub fn list(&self) -> Vec<Restaurant> {
        self.inner.with(|store| store.list().to_vec())
    }

    pub fn append(&self, restaurant: Restaurant) {
        self.inner.update(|store| store.append(restaurant));
    }
}

pub fn use_repository() -> RestaurantRepository {
    expect_context::<RestaurantRepository>()
}
