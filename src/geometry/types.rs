use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::GeometryError;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, GeometryError> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(GeometryError::LatitudeOutOfRange(latitude_deg));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(GeometryError::LongitudeOutOfRange(longitude_deg));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    /// Parses the decimal-degree strings the position service reports.
    pub fn from_decimal_strings(latitude: &str, longitude: &str) -> Result<Self, GeometryError> {
        let lat = parse_degrees(latitude)?;
        let lon = parse_degrees(longitude)?;
        Self::new(lat, lon)
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

fn parse_degrees(raw: &str) -> Result<f64, GeometryError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeometryError::InvalidNumber(raw.to_string()))
}

/// Earth-centred position in meters on the spherical model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPoint {
    pub fn dot(&self, other: &CartesianPoint) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}
