use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Comment attached to the overall place rating when it is folded into the review list.
pub const UNCOMMENTED_REVIEW: &str = "Review without comment";

pub const MAX_STARS: f32 = 5.0;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct LatLong {
    pub lat: f64,
    pub long: f64,
}

impl LatLong {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

/// Rectangular viewport, as reported by the map widget.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct MapBounds {
    pub north_east: LatLong,
    pub south_west: LatLong,
}

impl MapBounds {
    /// Inclusive containment test. A viewport whose west edge lies east of its
    /// east edge spans the antimeridian.
    pub fn contains(&self, point: LatLong) -> bool {
        let within_lat = point.lat >= self.south_west.lat && point.lat <= self.north_east.lat;
        let within_long = if self.south_west.long <= self.north_east.long {
            point.long >= self.south_west.long && point.long <= self.north_east.long
        } else {
            point.long >= self.south_west.long || point.long <= self.north_east.long
        };
        within_lat && within_long
    }

    pub fn center(&self) -> LatLong {
        LatLong {
            lat: (self.north_east.lat + self.south_west.lat) / 2.0,
            long: (self.north_east.long + self.south_west.long) / 2.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Rating {
    pub stars: f32,
    #[serde(default)]
    pub comment: String,
}

impl Rating {
    pub fn new(stars: f32, comment: impl Into<String>) -> Self {
        Self {
            stars,
            comment: comment.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Restaurant {
    #[serde(alias = "restaurantName")]
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub lat: f64,
    pub long: f64,
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    /// Meters from the user's last known location, filled in by marker reconciliation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Restaurant {
    pub fn location(&self) -> LatLong {
        LatLong::new(self.lat, self.long)
    }

    pub fn average_rating(&self) -> f32 {
        average_stars(&self.ratings)
    }

    pub fn has_rating(&self, stars: f32) -> bool {
        self.ratings.iter().any(|rating| rating.stars == stars)
    }
}

/// Mean of the star values, or 0 for an empty list.
pub fn average_stars(ratings: &[Rating]) -> f32 {
    if ratings.is_empty() {
        return 0.0;
    }
    let total: f32 = ratings.iter().map(|rating| rating.stars).sum();
    total / ratings.len() as f32
}

/// Rounds to the nearest half star.
pub fn round_to_half(value: f32) -> f32 {
    (value * 2.0).round() / 2.0
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    Stars(u8),
}

impl RatingFilter {
    pub const OPTIONS: [RatingFilter; 6] = [
        RatingFilter::All,
        RatingFilter::Stars(1),
        RatingFilter::Stars(2),
        RatingFilter::Stars(3),
        RatingFilter::Stars(4),
        RatingFilter::Stars(5),
    ];

    /// Parses the select-box value: -1 for all, 1 through 5 for a star count.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            -1 => Some(Self::All),
            1..=5 => Some(Self::Stars(value as u8)),
            _ => None,
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            Self::All => -1,
            Self::Stars(stars) => i32::from(*stars),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::Stars(1) => "1 star".to_string(),
            Self::Stars(stars) => format!("{stars} stars"),
        }
    }

    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        match self {
            Self::All => true,
            Self::Stars(stars) => restaurant.has_rating(f32::from(*stars)),
        }
    }
}

/// Keeps the restaurants that pass `filter`, preserving order.
pub fn filter_restaurants(restaurants: &[Restaurant], filter: RatingFilter) -> Vec<Restaurant> {
    restaurants
        .iter()
        .filter(|restaurant| filter.matches(restaurant))
        .cloned()
        .collect()
}

/// A nearby-search hit, before its reviews have been fetched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub location: LatLong,
    pub rating: Option<f32>,
    pub image_url: Option<String>,
}

impl PlaceSummary {
    /// Builds a restaurant from the place and its fetched reviews. Reviews are
    /// only kept when the place carries an overall rating, which is appended
    /// last as an uncommented review.
    pub fn into_restaurant(self, reviews: Vec<Rating>) -> Restaurant {
        let ratings = match self.rating {
            Some(overall) => {
                let mut ratings = reviews;
                ratings.push(Rating::new(overall, UNCOMMENTED_REVIEW));
                ratings
            }
            None => Vec::new(),
        };

        Restaurant {
            name: self.name,
            address: self.address,
            lat: self.location.lat,
            long: self.location.long,
            image_url: self.image_url,
            ratings,
            distance: None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("restaurant name is required")]
    EmptyName,
    #[error("rating must be between 0 and 5 in half-star steps, got {0}")]
    InvalidStars(f32),
}

/// Payload of the add-restaurant form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewRestaurant {
    pub name: String,
    pub comment: String,
    pub stars: f32,
    pub location: LatLong,
}

impl NewRestaurant {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        validate_stars(self.stars)
    }

    pub fn into_restaurant(self, address: String) -> Restaurant {
        Restaurant {
            name: self.name.trim().to_string(),
            address,
            lat: self.location.lat,
            long: self.location.long,
            image_url: None,
            ratings: vec![Rating::new(self.stars, self.comment)],
            distance: None,
        }
    }
}

pub fn validate_stars(stars: f32) -> Result<(), ValidationError> {
    let in_range = (0.0..=MAX_STARS).contains(&stars);
    if in_range && (stars * 2.0).fract() == 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidStars(stars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(name: &str, stars: &[f32]) -> Restaurant {
        Restaurant {
            name: name.to_string(),
            address: String::new(),
            lat: 0.0,
            long: 0.0,
            image_url: None,
            ratings: stars.iter().map(|s| Rating::new(*s, "")).collect(),
            distance: None,
        }
    }

    #[test]
    fn average_of_empty_ratings_is_zero() {
        assert_eq!(average_stars(&[]), 0.0);
    }

    #[test]
    fn average_is_sum_over_count() {
        let r = restaurant("A", &[4.0, 2.0]);
        assert_eq!(r.average_rating(), 3.0);

        let r = restaurant("B", &[5.0, 4.0, 4.0]);
        assert!((r.average_rating() - 13.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn half_step_rounding_is_idempotent() {
        for raw in [0.0, 0.2, 1.26, 2.5, 3.74, 4.333, 4.9, 5.0] {
            let once = round_to_half(raw);
            assert_eq!(round_to_half(once), once);
            assert_eq!((once * 2.0).fract(), 0.0);
        }
        assert_eq!(round_to_half(4.333), 4.5);
        assert_eq!(round_to_half(4.2), 4.0);
    }

    #[test]
    fn filter_all_returns_input_in_order() {
        let list = vec![
            restaurant("C", &[1.0]),
            restaurant("A", &[]),
            restaurant("B", &[5.0]),
        ];
        assert_eq!(filter_restaurants(&list, RatingFilter::All), list);
    }

    #[test]
    fn filter_by_stars_keeps_restaurants_with_an_exact_match() {
        let list = vec![
            restaurant("A", &[4.0, 2.0]),
            restaurant("B", &[4.5]),
            restaurant("C", &[3.0, 4.0]),
        ];
        let names: Vec<_> = filter_restaurants(&list, RatingFilter::Stars(4))
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert!(filter_restaurants(&list, RatingFilter::Stars(5)).is_empty());
    }

    #[test]
    fn filter_values_round_trip_through_select_box() {
        for filter in RatingFilter::OPTIONS {
            assert_eq!(RatingFilter::from_value(filter.value()), Some(filter));
        }
        assert_eq!(RatingFilter::from_value(0), None);
        assert_eq!(RatingFilter::from_value(6), None);
        assert_eq!(RatingFilter::Stars(1).label(), "1 star");
        assert_eq!(RatingFilter::Stars(3).label(), "3 stars");
    }

    #[test]
    fn bounds_contain_points_inside_and_on_edges() {
        let bounds = MapBounds {
            north_east: LatLong::new(38.8, -9.0),
            south_west: LatLong::new(38.6, -9.3),
        };
        assert!(bounds.contains(LatLong::new(38.72, -9.13)));
        assert!(bounds.contains(LatLong::new(38.8, -9.3)));
        assert!(!bounds.contains(LatLong::new(38.9, -9.13)));
        assert!(!bounds.contains(LatLong::new(38.72, -8.9)));
    }

    #[test]
    fn bounds_across_antimeridian() {
        let bounds = MapBounds {
            north_east: LatLong::new(10.0, -170.0),
            south_west: LatLong::new(-10.0, 170.0),
        };
        assert!(bounds.contains(LatLong::new(0.0, 179.0)));
        assert!(bounds.contains(LatLong::new(0.0, -175.0)));
        assert!(!bounds.contains(LatLong::new(0.0, 0.0)));
    }

    #[test]
    fn place_without_overall_rating_drops_reviews() {
        let place = PlaceSummary {
            place_id: "p1".to_string(),
            name: "Tasca".to_string(),
            address: "Rua A".to_string(),
            location: LatLong::new(1.0, 2.0),
            rating: None,
            image_url: None,
        };
        let restaurant = place.into_restaurant(vec![Rating::new(5.0, "great")]);
        assert!(restaurant.ratings.is_empty());
        assert_eq!(restaurant.location(), LatLong::new(1.0, 2.0));
    }

    #[test]
    fn place_with_overall_rating_appends_it_after_reviews() {
        let place = PlaceSummary {
            place_id: "p1".to_string(),
            name: "Tasca".to_string(),
            address: "Rua A".to_string(),
            location: LatLong::new(1.0, 2.0),
            rating: Some(4.3),
            image_url: Some("https://img".to_string()),
        };
        let restaurant = place.into_restaurant(vec![Rating::new(5.0, "great")]);
        assert_eq!(
            restaurant.ratings,
            vec![Rating::new(5.0, "great"), Rating::new(4.3, UNCOMMENTED_REVIEW)]
        );
        assert_eq!(restaurant.image_url.as_deref(), Some("https://img"));
    }

    #[test]
    fn new_restaurant_validation() {
        let mut form = NewRestaurant {
            name: "  ".to_string(),
            comment: "nice".to_string(),
            stars: 3.5,
            location: LatLong::new(1.0, 2.0),
        };
        assert_eq!(form.validate(), Err(ValidationError::EmptyName));

        form.name = " Bistro ".to_string();
        assert_eq!(form.validate(), Ok(()));

        form.stars = 3.3;
        assert_eq!(form.validate(), Err(ValidationError::InvalidStars(3.3)));
        form.stars = 5.5;
        assert!(form.validate().is_err());

        form.stars = 0.0;
        let restaurant = form.into_restaurant("Rua B".to_string());
        assert_eq!(restaurant.name, "Bistro");
        assert_eq!(restaurant.ratings, vec![Rating::new(0.0, "nice")]);
    }

    #[test]
    fn seed_records_deserialize_from_camel_case_field_names() {
        let json = r#"{
            "restaurantName": "Bondi",
            "address": "Rua C",
            "lat": 38.7,
            "long": -9.1,
            "ratings": [{ "stars": 4, "comment": "ok" }]
        }"#;
        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(restaurant.name, "Bondi");
        assert_eq!(restaurant.ratings[0].stars, 4.0);
        assert_eq!(restaurant.image_url, None);
    }
}
