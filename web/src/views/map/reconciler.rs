use shared_types::{LatLong, Restaurant};

use super::surface::{MapSurface, MarkerSpec, MarkerStyle};
use super::util::distance_meters;

/// Owns the restaurant markers currently on the map and rebuilds them from scratch.
pub struct MarkerReconciler<S: MapSurface> {
    markers: Vec<S::Marker>,
}

impl<S: MapSurface> Default for MarkerReconciler<S> {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
        }
    }
}

impl<S: MapSurface> MarkerReconciler<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn clear(&mut self, surface: &S) {
        for marker in self.markers.drain(..) {
            surface.remove_marker(marker);
        }
    }

    /// Drops every owned marker, then places one per restaurant inside the
    /// viewport. Returns the visible restaurants with their distance to `user`
    /// filled in, or `None` while either the viewport or the user location is
    /// unknown (the map is left without restaurant markers in that case).
    pub fn rebuild(
        &mut self,
        surface: &S,
        restaurants: &[Restaurant],
        user: Option<LatLong>,
        selected_name: Option<&str>,
    ) -> Option<Vec<Restaurant>> {
        self.clear(surface);

        let bounds = surface.bounds()?;
        let user = user?;

        let mut visible = Vec::new();
        for restaurant in restaurants {
            let position = restaurant.location();
            if !bounds.contains(position) {
                continue;
            }

            let mut restaurant = restaurant.clone();
            restaurant.distance = Some(distance_meters(user, position));

            let spec = MarkerSpec {
                style: MarkerStyle::for_restaurant(selected_name == Some(restaurant.name.as_str())),
                restaurant,
            };
            self.markers.push(surface.add_marker(&spec));
            visible.push(spec.restaurant);
        }

        Some(visible)
    }
}
