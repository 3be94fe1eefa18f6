use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::position::PositionSource;
use crate::store::{SampleStore, SqliteStore};
use crate::tracker::{record, RunError, Sample};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 1000;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSamplesQuery {
    /// Maximum number of samples to return (default 20, at most 1000)
    pub limit: Option<usize>,
}

/// Runs `f` against the locked store on the blocking pool, keeping SQLite
/// I/O off the async workers.
async fn with_store<T, E, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&mut SqliteStore) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    let result = tokio::task::spawn_blocking(move || {
        let mut guard = store.blocking_lock();
        f(&mut *guard)
    })
    .await?;
    result.map_err(Into::into)
}

#[utoipa::path(
    post,
    path = "/api/track",
    responses(
        (status = 200, description = "Sample recorded", body = Sample),
        (status = 422, description = "Speed could not be computed", body = ErrorResponse),
        (status = 502, description = "Position service failed", body = ErrorResponse),
        (status = 503, description = "Sample store unavailable", body = ErrorResponse)
    ),
    tag = "samples"
)]
pub async fn track(State(state): State<AppState>) -> ApiResult<Json<Sample>> {
    // The store stays unlocked while the position service answers.
    let fix = state.source.fetch().await.map_err(RunError::from)?;
    let sample = with_store(&state, move |store| record(store, &fix)).await?;
    Ok(Json(sample))
}

#[utoipa::path(
    get,
    path = "/api/samples/latest",
    responses(
        (status = 200, description = "Most recent sample, if any", body = Option<Sample>),
        (status = 503, description = "Sample store unavailable", body = ErrorResponse)
    ),
    tag = "samples"
)]
pub async fn latest(State(state): State<AppState>) -> ApiResult<Json<Option<Sample>>> {
    let latest = with_store(&state, |store| store.latest()).await?;
    Ok(Json(latest))
}

#[utoipa::path(
    get,
    path = "/api/samples",
    params(ListSamplesQuery),
    responses(
        (status = 200, description = "Samples, newest first", body = Vec<Sample>),
        (status = 503, description = "Sample store unavailable", body = ErrorResponse)
    ),
    tag = "samples"
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListSamplesQuery>,
) -> ApiResult<Json<Vec<Sample>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let samples = with_store(&state, move |store| store.recent(limit)).await?;
    Ok(Json(samples))
}
