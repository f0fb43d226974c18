pub mod add_restaurant_modal;
pub mod geolocation;
pub mod leaflet_surface;
pub mod lifecycle;
pub mod lookup;
pub mod map_host;
pub mod reconciler;
pub mod surface;
pub mod util;
