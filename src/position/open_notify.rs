use chrono::DateTime;
use serde::Deserialize;

use super::{FetchError, PositionFix, PositionSource};
use crate::config::PositionConfig;
use crate::geometry::GeoPoint;

pub const DEFAULT_URL: &str = "http://api.open-notify.org/iss-now.json";

const SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
struct IssNowResponse {
    message: Option<String>,
    timestamp: Option<f64>,
    iss_position: Option<IssPosition>,
}

#[derive(Debug, Deserialize)]
struct IssPosition {
    latitude: String,
    longitude: String,
}

/// Decodes an `iss-now` payload into a fix.
pub fn decode_iss_now(body: &str) -> Result<PositionFix, FetchError> {
    let response: IssNowResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    match response.message.as_deref() {
        Some(SUCCESS) => {}
        Some(other) => return Err(FetchError::Rejected(other.to_string())),
        None => return Err(FetchError::Rejected("missing status message".into())),
    }

    let seconds = response
        .timestamp
        .ok_or_else(|| FetchError::Malformed("missing timestamp".into()))?;
    let timestamp = DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
        .ok_or_else(|| FetchError::Malformed(format!("timestamp {} out of range", seconds)))?;

    let raw = response
        .iss_position
        .ok_or_else(|| FetchError::Malformed("missing iss_position".into()))?;
    let position = GeoPoint::from_decimal_strings(&raw.latitude, &raw.longitude)?;

    Ok(PositionFix {
        timestamp,
        position,
    })
}

/// Client for the open-notify `iss-now` endpoint.
#[derive(Debug, Clone)]
pub struct OpenNotifyClient {
    client: reqwest::Client,
    url: String,
}

impl OpenNotifyClient {
    pub fn new(config: &PositionConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("iss-o-mat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PositionSource for OpenNotifyClient {
    async fn fetch(&self) -> Result<PositionFix, FetchError> {
        log::debug!("Fetching position from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        decode_iss_now(&body)
    }
}
