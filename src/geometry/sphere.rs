use super::types::{CartesianPoint, GeoPoint};

/// Earth radius in meters. Spherical model, shared by projection and distance.
pub const EARTH_RADIUS_M: f64 = 6_378_000.0;

pub fn to_cartesian(p: GeoPoint) -> CartesianPoint {
    let lat = p.lat_rad();
    let lon = p.lon_rad();
    let rho = EARTH_RADIUS_M * lat.cos();
    CartesianPoint {
        x: rho * lon.cos(),
        y: rho * lon.sin(),
        z: EARTH_RADIUS_M * lat.sin(),
    }
}

/// Cosine of the central angle between two surface points, clamped to [-1, 1].
pub fn central_angle_cos(a: CartesianPoint, b: CartesianPoint) -> f64 {
    // Rounding can push the ratio just past ±1, where acos is NaN.
    (a.dot(&b) / (EARTH_RADIUS_M * EARTH_RADIUS_M)).clamp(-1.0, 1.0)
}

/// Great-circle arc length in meters.
pub fn distance(a: CartesianPoint, b: CartesianPoint) -> f64 {
    EARTH_RADIUS_M * central_angle_cos(a, b).acos()
}

pub fn great_circle_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    distance(to_cartesian(from), to_cartesian(to))
}
