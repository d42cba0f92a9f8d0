pub mod config;
pub mod fixtures;
pub mod handlers;
pub mod status;
pub mod storage;
pub mod websocket;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::AppState;
use crate::websocket::ChannelState;

/// Assemble the full router: REST surface plus the status channel. The
/// two route groups carry different state, so they are built separately
/// and merged, and the channel path comes from configuration.
pub fn build_router(state: AppState, channel: ChannelState) -> Router {
    let websocket_path = state.websocket_path.clone();

    let api_routes = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/home", get(handlers::get_home))
        .route("/api/terraces", get(handlers::get_terraces))
        .route("/api/cicd", get(handlers::get_cicd))
        .route("/api/cicd/runs", post(handlers::create_runs))
        .route("/api/cicd/single-run", post(handlers::create_single_run))
        .with_state(state);

    let ws_routes = Router::new()
        .route(&websocket_path, get(websocket::websocket_handler))
        .with_state(channel);

    Router::new().merge(api_routes).merge(ws_routes)
}
