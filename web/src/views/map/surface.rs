use shared_types::{LatLong, MapBounds, Restaurant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Restaurant,
    Selected,
    User,
}

impl MarkerStyle {
    pub fn for_restaurant(is_selected: bool) -> Self {
        if is_selected {
            Self::Selected
        } else {
            Self::Restaurant
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    /// The record this marker stands for, reported back as-is on click.
    pub restaurant: Restaurant,
    pub style: MarkerStyle,
}

impl MarkerSpec {
    pub fn position(&self) -> LatLong {
        self.restaurant.location()
    }

    /// Shown on hover.
    pub fn title(&self) -> &str {
        &self.restaurant.name
    }
}

/// What marker reconciliation needs from a map widget.
pub trait MapSurface {
    type Marker;

    /// Current viewport, if the widget has laid itself out yet.
    fn bounds(&self) -> Option<MapBounds>;

    fn add_marker(&self, spec: &MarkerSpec) -> Self::Marker;

    fn remove_marker(&self, marker: Self::Marker);
}
