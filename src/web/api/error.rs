use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio::task::JoinError;
use utoipa::ToSchema;

use crate::store::StoreError;
use crate::tracker::RunError;

pub enum ApiError {
    Run(RunError),
    Store(StoreError),
    Task(JoinError),
}

impl From<RunError> for ApiError {
    fn from(e: RunError) -> Self {
        ApiError::Run(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        ApiError::Task(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::Run(RunError::Fetch(_)) => (StatusCode::BAD_GATEWAY, "fetch_failed"),
            ApiError::Run(RunError::Computation(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "computation_failed")
            }
            ApiError::Run(RunError::Connection(_))
            | ApiError::Run(RunError::Store(_))
            | ApiError::Store(_) => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
            ApiError::Task(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        let message = match self {
            ApiError::Run(e) => e.to_string(),
            ApiError::Store(e) => e.to_string(),
            ApiError::Task(e) => e.to_string(),
        };
        log::error!("Request failed: {}", message);

        (status, Json(ErrorResponse::new(error, &message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}
