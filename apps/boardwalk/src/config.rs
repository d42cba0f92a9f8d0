use std::env;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis_url: String,
    /// Route the status channel is served on.
    pub websocket_path: String,
    /// Delay between successive status pushes, per connection.
    pub status_interval_ms: u64,
    /// How long cached run records live in Redis.
    pub retention_hours: u64,
    /// Origins the frontend is served from.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("BOARDWALK_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            websocket_path: env::var("BOARDWALK_WS_PATH")
                .unwrap_or_else(|_| "/ws/cicd".to_string()),
            status_interval_ms: env::var("BOARDWALK_STATUS_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
            retention_hours: env::var("BOARDWALK_RETENTION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            allowed_origins: env::var("BOARDWALK_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_else(|_| default_origins()),
        }
    }

    pub fn retention_seconds(&self) -> u64 {
        self.retention_hours * 3_600
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            redis_url: "redis://localhost:6379".to_string(),
            websocket_path: "/ws/cicd".to_string(),
            status_interval_ms: 5_000,
            retention_hours: 24,
            allowed_origins: default_origins(),
        }
    }
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:5174".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.to_string())
        .collect()
}
