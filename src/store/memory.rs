use chrono::{DateTime, Utc};

use super::{SampleStore, StoreError};
use crate::geometry::GeoPoint;
use crate::tracker::Sample;

/// In-process store for exercising the pipeline without SQLite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    samples: Vec<Sample>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices ordered newest first; insertion order breaks timestamp ties.
    fn newest_first(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.samples.len()).collect();
        order.sort_by(|&a, &b| {
            (self.samples[b].timestamp, b).cmp(&(self.samples[a].timestamp, a))
        });
        order
    }
}

impl SampleStore for MemoryStore {
    fn latest(&self) -> Result<Option<Sample>, StoreError> {
        Ok(self
            .samples
            .iter()
            .enumerate()
            .max_by_key(|(i, s)| (s.timestamp, *i))
            .map(|(_, s)| s.clone()))
    }

    fn append(
        &mut self,
        position: GeoPoint,
        timestamp: DateTime<Utc>,
        speed_m_s: f64,
    ) -> Result<Sample, StoreError> {
        let sample = Sample {
            timestamp,
            position,
            speed_m_s,
        };
        self.samples.push(sample.clone());
        Ok(sample)
    }

    fn recent(&self, limit: usize) -> Result<Vec<Sample>, StoreError> {
        Ok(self
            .newest_first()
            .into_iter()
            .take(limit)
            .map(|i| self.samples[i].clone())
            .collect())
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.samples.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn orders_like_sqlite() {
        let mut store = MemoryStore::new();
        let p = |lat: f64| GeoPoint::new(lat, 0.0).unwrap();
        let at = |s: i64| Utc.timestamp_opt(s, 0).unwrap();

        store.append(p(1.0), at(20), 0.0).unwrap();
        store.append(p(2.0), at(10), 0.0).unwrap();
        store.append(p(3.0), at(20), 0.0).unwrap();

        assert_eq!(store.latest().unwrap().unwrap().position, p(3.0));
        let lats: Vec<_> = store
            .recent(10)
            .unwrap()
            .iter()
            .map(|s| s.position.latitude_deg)
            .collect();
        assert_eq!(lats, vec![3.0, 1.0, 2.0]);
    }
}
