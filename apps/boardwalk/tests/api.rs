//! REST surface contract tests over a real listener. Redis is not
//! required: the server runs cache-less and health reports it.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use boardwalk::{
    build_router, handlers::AppState, status::StatusFeed, websocket::ChannelState,
};

async fn spawn_api() -> String {
    let channel = ChannelState::new(
        Arc::new(StatusFeed::with_default_catalog()),
        Duration::from_millis(5_000),
        CancellationToken::new(),
    );
    let state = AppState {
        storage: None,
        websocket_path: "/ws/cicd".to_string(),
        retention_hours: 24,
        redis_endpoint: "redis://localhost:6379".to_string(),
    };
    let app = build_router(state, channel);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn get_json(url: &str) -> Value {
    reqwest::get(url).await.unwrap().json().await.unwrap()
}

#[test_deadline::deadline]
async fn banner_reports_channel_and_cache_settings() {
    let base = spawn_api().await;
    let body = get_json(&base).await;

    assert_eq!(body["message"], "Server is running!");
    assert_eq!(body["websocketEndpoint"], "/ws/cicd");
    assert_eq!(body["redis"], "disconnected");
    assert_eq!(body["dataRetentionHours"], 24);
}

#[test_deadline::deadline]
async fn health_reports_cache_connectivity() {
    let base = spawn_api().await;
    let body = get_json(&format!("{base}/health")).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["redis"], false);
    assert_eq!(body["redisEndpoint"], "redis://localhost:6379");
    assert!(body["timestamp"].is_string());
}

#[test_deadline::deadline]
async fn home_view_serves_dashboard_fixture() {
    let base = spawn_api().await;
    let body = get_json(&format!("{base}/api/home")).await;

    assert_eq!(body["title"], "Welcome to Modern Web App");
    assert_eq!(body["stats"].as_array().unwrap().len(), 3);
    assert_eq!(body["recentActivity"].as_array().unwrap().len(), 4);
    assert_eq!(body["stats"][0]["label"], "Total Users");
    assert_eq!(body["stats"][0]["value"], 1250);
}

#[test_deadline::deadline]
async fn terraces_view_serves_fixture_with_weather() {
    let base = spawn_api().await;
    let body = get_json(&format!("{base}/api/terraces")).await;

    assert_eq!(body["terraces"].as_array().unwrap().len(), 4);
    assert_eq!(body["terraces"][0]["lastWatered"], "2 hours ago");
    assert_eq!(body["weather"]["current"], "Sunny");
    assert_eq!(body["weather"]["forecast"].as_array().unwrap().len(), 4);
}

#[test_deadline::deadline]
async fn cicd_view_serves_pipelines_and_deployments() {
    let base = spawn_api().await;
    let body = get_json(&format!("{base}/api/cicd")).await;

    assert_eq!(body["pipelines"].as_array().unwrap().len(), 4);
    assert_eq!(body["recentDeployments"].as_array().unwrap().len(), 4);
    assert_eq!(body["pipelines"][1]["status"], "running");
    assert_eq!(body["recentDeployments"][0]["environment"], "Production");
}

#[test_deadline::deadline]
async fn run_submission_echoes_payload_and_queues() {
    let base = spawn_api().await;
    let client = reqwest::Client::new();
    let payload = json!({"project": "frontend", "branch": "main"});

    let body: Value = client
        .post(format!("{base}/api/cicd/runs"))
        .json(&payload)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "queued");
    assert_eq!(body["received"], payload);
    let run_id = body["runId"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(run_id).is_ok());
}

#[test_deadline::deadline]
async fn single_run_submission_generates_fresh_ids() {
    let base = spawn_api().await;
    let client = reqwest::Client::new();
    let payload = json!({"project": "backend"});

    let mut run_ids = Vec::new();
    for _ in 0..2 {
        let body: Value = client
            .post(format!("{base}/api/cicd/single-run"))
            .json(&payload)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "queued");
        run_ids.push(body["runId"].as_str().unwrap().to_string());
    }

    assert_ne!(run_ids[0], run_ids[1]);
}
