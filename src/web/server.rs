use axum::{routing::get, routing::post, Json, Router};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::Config;
use crate::position::{FetchError, OpenNotifyClient};
use crate::store::{SampleStore, SqliteStore, StoreError};

use super::api::samples as sample_handlers;
use super::api_doc::ApiDoc;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("sample store: {0}")]
    Store(#[from] StoreError),
    #[error("position client: {0}")]
    Client(#[from] FetchError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<SqliteStore>>,
    pub source: Arc<OpenNotifyClient>,
}

impl AppState {
    pub fn new(store: SqliteStore, source: OpenNotifyClient) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
            source: Arc::new(source),
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/track", post(sample_handlers::track))
        .route("/api/samples", get(sample_handlers::list))
        .route("/api/samples/latest", get(sample_handlers::latest))
        .route("/api-doc/openapi.json", get(openapi_json))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServeError> {
    let store = SqliteStore::connect(&config.store.uri)?;
    log::info!("Sample store holds {} samples", store.count()?);
    let source = OpenNotifyClient::new(&config.position)?;
    let app = build_router(AppState::new(store, source));

    log::info!("Starting server on {}", config.web.bind);

    let listener = tokio::net::TcpListener::bind(&config.web.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
            log::info!("Shutting down");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PositionConfig;
    use crate::tracker::Sample;
    use axum::http::StatusCode;
    use std::time::Duration;

    const ISS_NOW: &str = r#"{"message": "success", "timestamp": 1700000000,
        "iss_position": {"latitude": "0.0", "longitude": "1.0"}}"#;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn spawn_api(position_service: Router) -> String {
        let upstream = spawn(position_service).await;
        let source = OpenNotifyClient::new(&PositionConfig {
            url: format!("{}/iss-now.json", upstream),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        let store = SqliteStore::connect(":memory:").unwrap();
        spawn(build_router(AppState::new(store, source))).await
    }

    #[tokio::test]
    async fn track_then_read_back() {
        let api = spawn_api(Router::new().route("/iss-now.json", get(|| async { ISS_NOW }))).await;
        let http = reqwest::Client::new();

        let latest: Option<Sample> = http
            .get(format!("{}/api/samples/latest", api))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(latest.is_none());

        let response = http.post(format!("{}/api/track", api)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let recorded: Sample = response.json().await.unwrap();
        assert_eq!(recorded.speed_m_s, 0.0);
        assert_eq!(recorded.position.longitude_deg, 1.0);

        // The stub keeps reporting the same timestamp.
        let response = http.post(format!("{}/api/track", api)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "computation_failed");

        let samples: Vec<Sample> = http
            .get(format!("{}/api/samples?limit=5", api))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(samples, vec![recorded.clone()]);

        let latest: Option<Sample> = http
            .get(format!("{}/api/samples/latest", api))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(latest, Some(recorded));
    }

    #[tokio::test]
    async fn upstream_failure_is_bad_gateway() {
        let api = spawn_api(Router::new().route(
            "/iss-now.json",
            get(|| async { r#"{"message": "failure"}"# }),
        ))
        .await;

        let response = reqwest::Client::new()
            .post(format!("{}/api/track", api))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "fetch_failed");
    }

    #[tokio::test]
    async fn reads_are_served_while_tracking_waits_on_upstream() {
        let api = spawn_api(Router::new().route(
            "/iss-now.json",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                ISS_NOW
            }),
        ))
        .await;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        let track = tokio::spawn({
            let http = http.clone();
            let url = format!("{}/api/track", api);
            async move { http.post(url).send().await.unwrap().status() }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let started = std::time::Instant::now();
        let latest: Option<Sample> = http
            .get(format!("{}/api/samples/latest", api))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let waited = started.elapsed();

        assert!(latest.is_none());
        assert!(waited < Duration::from_millis(300), "read waited {:?}", waited);
        assert_eq!(track.await.unwrap(), StatusCode::OK);
    }

    #[tokio::test]
    async fn serves_openapi_document() {
        let api = spawn_api(Router::new()).await;

        let doc: serde_json::Value = reqwest::get(format!("{}/api-doc/openapi.json", api))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(doc["paths"]["/api/track"]["post"].is_object());
        assert!(doc["paths"]["/api/samples"]["get"].is_object());
    }
}
