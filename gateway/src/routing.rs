//! API 路由

use std::path::Path;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use partner_config::GatewayConfig;
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::{cors_layer, timeout_layer};
use crate::partner::{SharedUpstream, partner_routes};

/// 组装网关路由
pub fn app(config: &GatewayConfig, upstream: SharedUpstream) -> Router {
    Router::new()
        .merge(partner_routes())
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest_service("/swagger", ServeDir::new(Path::new(&config.swagger_dir)))
        .with_state(upstream)
        .layer(timeout_layer(config.request_timeout_secs))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<ServiceCheck>,
}

#[derive(Debug, Serialize)]
pub struct ServiceCheck {
    pub name: String,
    pub healthy: bool,
}

async fn readiness_check(State(upstream): State<SharedUpstream>) -> (StatusCode, Json<ReadinessResponse>) {
    let healthy = upstream.is_ready().await;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready: healthy,
            checks: vec![ServiceCheck {
                name: "partner-service".to_string(),
                healthy,
            }],
        }),
    )
}
