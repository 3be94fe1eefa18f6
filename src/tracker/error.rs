use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::position::FetchError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ComputationError {
    #[error("no time elapsed since the previous sample at {at}")]
    ZeroElapsed { at: DateTime<Utc> },
    #[error("speed is not finite ({distance_m} m over {elapsed_s} s)")]
    NonFinite { distance_m: f64, elapsed_s: f64 },
}

/// Why a tracking run failed. Nothing is written when a run fails.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot connect to sample store: {0}")]
    Connection(#[source] StoreError),
    #[error("position fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("speed computation failed: {0}")]
    Computation(#[from] ComputationError),
    #[error("sample store error: {0}")]
    Store(#[from] StoreError),
}
