mod error;
mod sphere;
mod types;

pub use error::GeometryError;
pub use sphere::{central_angle_cos, distance, great_circle_distance, to_cartesian, EARTH_RADIUS_M};
pub use types::{CartesianPoint, GeoPoint};
