use std::rc::Rc;

use leptos::logging::error;
use leptos_leaflet::leaflet::{Icon, IconOptions, LatLng, LatLngBounds, Map, Marker, MarkerOptions, Point};
use shared_types::{LatLong, MapBounds, Restaurant};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::EventTarget;

use super::surface::{MapSurface, MarkerSpec, MarkerStyle};

/// A Leaflet marker plus the click handler that has to outlive it.
pub struct LeafletMarker {
    marker: Marker,
    _on_click: Option<Closure<dyn FnMut(JsValue)>>,
}

/// [`MapSurface`] over a live Leaflet map. Marker clicks report the marked restaurant.
pub struct LeafletSurface {
    map: Map,
    on_marker_click: Rc<dyn Fn(Restaurant)>,
}

impl LeafletSurface {
    pub fn new(map: Map, on_marker_click: Rc<dyn Fn(Restaurant)>) -> Self {
        Self {
            map,
            on_marker_click,
        }
    }

    pub fn center_on(&self, position: LatLong) {
        self.map
            .set_view(&to_lat_lng(position), self.map.get_zoom());
    }

    pub fn center(&self) -> LatLong {
        let center = self.map.get_center();
        LatLong::new(center.lat(), center.lng())
    }

    /// Places the "you are here" marker. It is not owned by reconciliation.
    pub fn add_user_marker(&self, position: LatLong) -> LeafletMarker {
        let marker = Marker::new_with_options(
            &to_lat_lng(position),
            &marker_options("Your Location", MarkerStyle::User),
        );
        marker.add_to(&self.map);
        LeafletMarker {
            marker,
            _on_click: None,
        }
    }
}

impl MapSurface for LeafletSurface {
    type Marker = LeafletMarker;

    fn bounds(&self) -> Option<MapBounds> {
        let map_bounds: LatLngBounds = self.map.get_bounds();
        let north_east: LatLng = map_bounds.get_north_east();
        let south_west: LatLng = map_bounds.get_south_west();
        Some(MapBounds {
            north_east: LatLong::new(north_east.lat(), north_east.lng()),
            south_west: LatLong::new(south_west.lat(), south_west.lng()),
        })
    }

    fn add_marker(&self, spec: &MarkerSpec) -> LeafletMarker {
        let marker = Marker::new_with_options(
            &to_lat_lng(spec.position()),
            &marker_options(spec.title(), spec.style),
        );
        marker.add_to(&self.map);

        let on_marker_click = self.on_marker_click.clone();
        let restaurant = spec.restaurant.clone();
        let cb: Closure<dyn FnMut(JsValue)> = Closure::wrap(Box::new(move |_event: JsValue| {
            on_marker_click(restaurant.clone());
        }));

        let raw_marker: &EventTarget = marker.unchecked_ref();
        if let Err(e) =
            raw_marker.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        {
            error!("Failed to attach marker click listener: {:?}", e);
        }

        LeafletMarker {
            marker,
            _on_click: Some(cb),
        }
    }

    fn remove_marker(&self, marker: LeafletMarker) {
        marker.marker.remove();
    }
}

fn to_lat_lng(position: LatLong) -> LatLng {
    LatLng::new(position.lat, position.long)
}

fn marker_options(title: &str, style: MarkerStyle) -> MarkerOptions {
    let icon_options = IconOptions::new();
    icon_options.set_icon_url(pin_svg(style));
    icon_options.set_icon_size(Point::new(28.0, 42.0));
    icon_options.set_icon_anchor(Point::new(14.0, 42.0));

    let options = MarkerOptions::new();
    options.set_icon(Icon::new(&icon_options));
    options.set_title(title.to_string());
    options
}

fn pin_svg(style: MarkerStyle) -> String {
    let fill_color = match style {
        MarkerStyle::Restaurant => "%23f97316",
        MarkerStyle::Selected => "%2316a34a",
        MarkerStyle::User => "%232563eb",
    };

    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='28' height='42' viewBox='0 0 28 42'%3E%3Cdefs%3E%3Cfilter id='shadow' x='-50%25' y='-50%25' width='200%25' height='200%25'%3E%3CfeDropShadow dx='0' dy='1' stdDeviation='1.5' flood-color='%23000' flood-opacity='0.25'/%3E%3C/filter%3E%3C/defs%3E%3Cpath fill='{}' stroke='%23ffffff' stroke-width='1.5' filter='url(%23shadow)' d='M14 2C8.5 2 4 6.5 4 12c0 8.5 10 26 10 26s10-17.5 10-26c0-5.5-4.5-10-10-10zm0 13.5c-1.9 0-3.5-1.6-3.5-3.5s1.6-3.5 3.5-3.5 3.5 1.6 3.5 3.5-1.6 3.5-3.5 3.5z'/%3E%3C/svg%3E",
        fill_color
    )
}
