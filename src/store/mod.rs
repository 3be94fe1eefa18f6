mod error;
#[cfg(test)]
mod memory;
mod sqlite;

use chrono::{DateTime, Utc};

use crate::geometry::GeoPoint;
use crate::tracker::Sample;

pub use error::StoreError;
#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Persistent, append-only sample history.
pub trait SampleStore {
    /// The sample with the greatest timestamp. Ties go to the last one appended.
    fn latest(&self) -> Result<Option<Sample>, StoreError>;

    /// Persists a new sample. Existing samples are never touched.
    fn append(
        &mut self,
        position: GeoPoint,
        timestamp: DateTime<Utc>,
        speed_m_s: f64,
    ) -> Result<Sample, StoreError>;

    /// Up to `limit` samples, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<Sample>, StoreError>;

    /// Number of stored samples.
    fn count(&self) -> Result<u64, StoreError>;
}
