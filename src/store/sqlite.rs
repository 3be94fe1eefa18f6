use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;

use super::{SampleStore, StoreError};
use crate::geometry::GeoPoint;
use crate::tracker::Sample;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS samples (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp_ms  INTEGER NOT NULL,
    latitude_deg  REAL NOT NULL,
    longitude_deg REAL NOT NULL,
    speed_m_s     REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS samples_by_timestamp ON samples (timestamp_ms, id);
";

const SELECT_COLUMNS: &str =
    "SELECT id, timestamp_ms, latitude_deg, longitude_deg, speed_m_s FROM samples";

#[derive(Debug, PartialEq)]
enum Location {
    Memory,
    File(PathBuf),
}

/// Parses `sqlite://<path>`, `sqlite::memory:`, `:memory:` or a bare path.
fn parse_uri(uri: &str) -> Result<Location, StoreError> {
    let uri = uri.trim();
    match uri {
        "" => Err(StoreError::UnsupportedUri(uri.to_string())),
        ":memory:" | "sqlite::memory:" | "sqlite://:memory:" => Ok(Location::Memory),
        _ => {
            if let Some(path) = uri.strip_prefix("sqlite://") {
                if path.is_empty() {
                    return Err(StoreError::UnsupportedUri(uri.to_string()));
                }
                Ok(Location::File(PathBuf::from(path)))
            } else if uri.contains("://") {
                Err(StoreError::UnsupportedUri(uri.to_string()))
            } else {
                Ok(Location::File(PathBuf::from(uri)))
            }
        }
    }
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn connect(uri: &str) -> Result<Self, StoreError> {
        let conn = match parse_uri(uri)? {
            Location::Memory => Connection::open_in_memory()?,
            Location::File(path) => Connection::open(path)?,
        };
        conn.execute_batch(SCHEMA)?;
        log::debug!("Opened sample store {}", uri);
        Ok(SqliteStore { conn })
    }

    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))
    }
}

struct SampleRow {
    id: i64,
    timestamp_ms: i64,
    latitude_deg: f64,
    longitude_deg: f64,
    speed_m_s: f64,
}

impl SampleRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(SampleRow {
            id: row.get(0)?,
            timestamp_ms: row.get(1)?,
            latitude_deg: row.get(2)?,
            longitude_deg: row.get(3)?,
            speed_m_s: row.get(4)?,
        })
    }

    fn into_sample(self) -> Result<Sample, StoreError> {
        let id = self.id;
        let timestamp =
            DateTime::from_timestamp_millis(self.timestamp_ms).ok_or_else(|| {
                StoreError::InvalidRow {
                    id,
                    reason: format!("timestamp {} out of range", self.timestamp_ms),
                }
            })?;
        let position = GeoPoint::new(self.latitude_deg, self.longitude_deg).map_err(|e| {
            StoreError::InvalidRow {
                id,
                reason: e.to_string(),
            }
        })?;

        Ok(Sample {
            timestamp,
            position,
            speed_m_s: self.speed_m_s,
        })
    }
}

impl SampleStore for SqliteStore {
    fn latest(&self) -> Result<Option<Sample>, StoreError> {
        let sql = format!("{} ORDER BY timestamp_ms DESC, id DESC LIMIT 1", SELECT_COLUMNS);
        self.conn
            .query_row(&sql, [], SampleRow::from_row)
            .optional()?
            .map(SampleRow::into_sample)
            .transpose()
    }

    fn append(
        &mut self,
        position: GeoPoint,
        timestamp: DateTime<Utc>,
        speed_m_s: f64,
    ) -> Result<Sample, StoreError> {
        self.conn.execute(
            "INSERT INTO samples (timestamp_ms, latitude_deg, longitude_deg, speed_m_s)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                timestamp.timestamp_millis(),
                position.latitude_deg,
                position.longitude_deg,
                speed_m_s
            ],
        )?;

        Ok(Sample {
            timestamp,
            position,
            speed_m_s,
        })
    }

    fn recent(&self, limit: usize) -> Result<Vec<Sample>, StoreError> {
        let sql = format!("{} ORDER BY timestamp_ms DESC, id DESC LIMIT ?1", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![limit], SampleRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(SampleRow::into_sample).collect()
    }

    fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM samples", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}
