use axum::http::{header, HeaderValue, Method};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use boardwalk::{
    build_router,
    config::Config,
    handlers::AppState,
    status::StatusFeed,
    storage::Storage,
    websocket::ChannelState,
};

#[derive(Parser, Debug)]
#[command(name = "boardwalk")]
#[command(about = "Internal dashboard API and CI/CD status channel")]
struct Cli {
    /// Override the listen port from the environment
    #[arg(long)]
    port: Option<u16>,

    /// Override the Redis connection URL
    #[arg(long)]
    redis_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level if RUST_LOG is not set
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(redis_url) = cli.redis_url {
        config.redis_url = redis_url;
    }

    info!("starting boardwalk dashboard server on port {}", config.port);
    info!("websocket endpoint: {}", config.websocket_path);
    info!("status update interval: {}ms", config.status_interval_ms);
    info!("run retention: {} hours", config.retention_hours);
    info!("allowed origins: {}", config.allowed_origins.join(", "));

    // The cache is optional; everything but run persistence works without it.
    let storage = match Storage::connect(&config.redis_url, config.retention_seconds()).await {
        Ok(storage) => {
            info!("redis connected at {}", config.redis_url);
            Some(storage)
        }
        Err(err) => {
            warn!(error = %err, "redis unavailable, continuing without run cache");
            None
        }
    };

    let shutdown = CancellationToken::new();
    let channel = ChannelState::new(
        Arc::new(StatusFeed::with_default_catalog()),
        Duration::from_millis(config.status_interval_ms),
        shutdown.clone(),
    );
    let state = AppState {
        storage,
        websocket_path: config.websocket_path.clone(),
        retention_hours: config.retention_hours,
        redis_endpoint: config.redis_url.clone(),
    };

    let app = build_router(state, channel)
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("boardwalk listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

/// Cancelling the token here fans out to every open session's child
/// token, so in-flight connections close before the process exits.
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
    shutdown.cancel();
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
