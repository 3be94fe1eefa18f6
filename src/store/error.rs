use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unsupported store URI: {0}")]
    UnsupportedUri(String),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid stored sample {id}: {reason}")]
    InvalidRow { id: i64, reason: String },
}
