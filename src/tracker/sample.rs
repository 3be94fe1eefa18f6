use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geometry::GeoPoint;
use crate::position::PositionFix;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub position: GeoPoint,
    /// Ground-track speed relative to the previous sample; 0 for the first one.
    pub speed_m_s: f64,
}

/// A timestamped position, stored or not.
pub trait Observation {
    fn timestamp(&self) -> DateTime<Utc>;
    fn position(&self) -> GeoPoint;
}

impl Observation for Sample {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn position(&self) -> GeoPoint {
        self.position
    }
}

impl Observation for PositionFix {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn position(&self) -> GeoPoint {
        self.position
    }
}
