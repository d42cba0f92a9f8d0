use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::fixtures::{self, CicdData, HomeData, TerracesData};
use crate::storage::{RunRecord, Storage};

/// Shared state for the REST surface. `storage` is `None` when Redis was
/// unreachable at startup; every handler degrades gracefully.
#[derive(Clone)]
pub struct AppState {
    pub storage: Option<Storage>,
    pub websocket_path: String,
    pub retention_hours: u64,
    pub redis_endpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerBanner {
    pub message: &'static str,
    pub websocket_endpoint: String,
    pub redis: &'static str,
    pub data_retention_hours: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub redis: bool,
    pub redis_endpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAccepted {
    pub run_id: String,
    pub status: &'static str,
    pub received: Value,
}

/// GET / - banner with the channel endpoint and cache settings.
pub async fn index(State(state): State<AppState>) -> Json<ServerBanner> {
    let redis = match &state.storage {
        Some(storage) if storage.ping().await => "connected",
        _ => "disconnected",
    };

    Json(ServerBanner {
        message: "Server is running!",
        websocket_endpoint: state.websocket_path.clone(),
        redis,
        data_retention_hours: state.retention_hours,
    })
}

/// GET /health - liveness probe with cache connectivity.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let redis = match &state.storage {
        Some(storage) => storage.ping().await,
        None => false,
    };

    Json(HealthStatus {
        status: "healthy",
        timestamp: chrono::Utc::now(),
        redis,
        redis_endpoint: state.redis_endpoint.clone(),
    })
}

/// GET /api/home
pub async fn get_home() -> Json<HomeData> {
    Json(fixtures::home_data())
}

/// GET /api/terraces
pub async fn get_terraces() -> Json<TerracesData> {
    Json(fixtures::terraces_data())
}

/// GET /api/cicd
pub async fn get_cicd() -> Json<CicdData> {
    Json(fixtures::cicd_data())
}

/// POST /api/cicd/runs - queue a batch run submission.
pub async fn create_runs(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Json<RunAccepted> {
    accept_run(&state, payload).await
}

/// POST /api/cicd/single-run - queue a single-project run.
pub async fn create_single_run(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Json<RunAccepted> {
    accept_run(&state, payload).await
}

async fn accept_run(state: &AppState, payload: Value) -> Json<RunAccepted> {
    let run_id = Uuid::new_v4().to_string();
    debug!(%run_id, "run submission received");

    if let Some(storage) = &state.storage {
        let record = RunRecord::new(run_id.clone(), payload.clone());
        // Caching is best-effort; the submission is acknowledged either way.
        if let Err(err) = storage.save_run(&record).await {
            warn!(%run_id, error = %err, "failed to cache run record");
        }
    }

    Json(RunAccepted {
        run_id,
        status: "queued",
        received: payload,
    })
}
