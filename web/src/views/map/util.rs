use shared_types::LatLong;

/// Equatorial radius used by the map SDKs for spherical distances.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

pub const DEFAULT_CENTER: LatLong = LatLong {
    lat: 38.724473,
    long: -9.131707,
};
pub const DEFAULT_ZOOM: f64 = 13.0;

/// Great-circle distance in meters.
pub fn distance_meters(from: LatLong, to: LatLong) -> f64 {
    let from_lat = from.lat.to_radians();
    let to_lat = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_long = (to.long - from.long).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + from_lat.cos() * to_lat.cos() * (delta_long / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Whole meters for display.
pub fn format_distance(distance: Option<f64>) -> String {
    match distance {
        Some(meters) => format!("Distance: {} meters", meters.round() as i64),
        None => "Distance: unknown".to_string(),
    }
}
