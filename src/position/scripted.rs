use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{FetchError, PositionFix, PositionSource};
use crate::geometry::GeoPoint;

/// Replays canned responses in order, then fails.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<PositionFix, FetchError>>>,
}

impl ScriptedSource {
    pub fn new(responses: impl IntoIterator<Item = Result<PositionFix, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
        }
    }

    pub fn fixes(fixes: impl IntoIterator<Item = PositionFix>) -> Self {
        Self::new(fixes.into_iter().map(Ok))
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl PositionSource for ScriptedSource {
    async fn fetch(&self) -> Result<PositionFix, FetchError> {
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(FetchError::Rejected("script exhausted".into())))
    }
}

pub fn fix(timestamp: DateTime<Utc>, lat: f64, lon: f64) -> PositionFix {
    PositionFix {
        timestamp,
        position: GeoPoint::new(lat, lon).unwrap(),
    }
}

/// Equatorial fixes one degree of longitude and `step` apart.
pub fn equator_walk(start: DateTime<Utc>, step: Duration, count: usize) -> Vec<PositionFix> {
    (0..count)
        .map(|i| fix(start + step * i as i32, 0.0, i as f64))
        .collect()
}
