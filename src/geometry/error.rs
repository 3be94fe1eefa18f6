use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("invalid coordinate: {0:?}")]
    InvalidNumber(String),
}
