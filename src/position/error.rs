use thiserror::Error;

use crate::geometry::GeometryError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("position service returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("position service reported failure: {0}")]
    Rejected(String),
    #[error("malformed position response: {0}")]
    Malformed(String),
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] GeometryError),
}
