mod error;
mod open_notify;
#[cfg(test)]
pub(crate) mod scripted;

use chrono::{DateTime, Utc};
use std::future::Future;

use crate::geometry::GeoPoint;

pub use error::FetchError;
pub use open_notify::{decode_iss_now, OpenNotifyClient, DEFAULT_URL};

/// One observation from the position service, not yet stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub timestamp: DateTime<Utc>,
    pub position: GeoPoint,
}

/// Where the current position of the tracked object comes from.
pub trait PositionSource {
    fn fetch(&self) -> impl Future<Output = Result<PositionFix, FetchError>> + Send;
}
