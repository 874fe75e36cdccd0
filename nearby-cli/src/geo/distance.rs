//! Haversine distance

use super::Coordinate;

/// Mean Earth radius
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Human-readable distance
///
/// Under 1 km renders whole meters (`"150 m"`), otherwise kilometers with
/// one decimal (`"2.3 km"`). Meters are rounded first, so anything that
/// rounds to 1000 m is shown in kilometers.
pub fn format_distance(km: f64) -> String {
    let km = if km.is_finite() { km.max(0.0) } else { 0.0 };
    let meters = (km * 1000.0).round();

    if meters < 1000.0 {
        format!("{} m", meters as u64)
    } else {
        format!("{:.1} km", km)
    }
}
