//! 健康检查模块
//!
//! 提供 /health、/ready 和 /metrics 端点

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use partner_adapter_postgres::check_connection;
use serde::Serialize;
use std::net::SocketAddr;
use tracing::info;

use crate::infrastructure::Infrastructure;
use crate::metrics::MetricsRecorder;

/// 健康检查状态
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub checks: Vec<ComponentHealth>,
}

/// 组件健康状态
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            checks: vec![],
        }
    }

    pub fn add_check(&mut self, check: ComponentHealth) {
        if check.status != "healthy" {
            self.status = "unhealthy".to_string();
        }
        self.checks.push(check);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "healthy".to_string(),
            message: None,
        }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "unhealthy".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 健康检查器
#[derive(Clone)]
pub struct HealthChecker {
    infra: Infrastructure,
}

impl HealthChecker {
    pub fn new(infra: Infrastructure) -> Self {
        Self { infra }
    }

    /// 存活检查，不检查依赖
    pub async fn liveness(&self) -> HealthStatus {
        HealthStatus::healthy()
    }

    /// 就绪检查，检查数据库是否可用
    pub async fn readiness(&self) -> HealthStatus {
        let mut status = HealthStatus::healthy();
        let pool = self.infra.postgres_pool();
        status.add_check(match check_connection(&pool).await {
            Ok(()) => ComponentHealth::healthy("postgres"),
            Err(e) => ComponentHealth::unhealthy("postgres", e.to_string()),
        });
        status
    }
}

#[derive(Clone)]
struct HealthServerState {
    checker: HealthChecker,
    metrics: Option<MetricsRecorder>,
}

/// HTTP 健康检查服务器
pub struct HealthServer {
    checker: HealthChecker,
    metrics: Option<MetricsRecorder>,
    port: u16,
}

impl HealthServer {
    pub fn new(checker: HealthChecker, metrics: Option<MetricsRecorder>, port: u16) -> Self {
        Self {
            checker,
            metrics,
            port,
        }
    }

    /// 构建路由
    pub fn router(&self) -> Router {
        let state = HealthServerState {
            checker: self.checker.clone(),
            metrics: self.metrics.clone(),
        };

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(state)
    }

    /// 启动 HTTP 服务器
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let app = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "Health check HTTP server starting");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await
    }
}

async fn health_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    let status = state.checker.liveness().await;
    (StatusCode::OK, Json(status))
}

async fn ready_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    let status = state.checker.readiness().await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn metrics_handler(State(state): State<HealthServerState>) -> impl IntoResponse {
    match state.metrics {
        Some(metrics) => (
            StatusCode::OK,
            [("content-type", "text/plain; charset=utf-8")],
            metrics.render(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [("content-type", "text/plain; charset=utf-8")],
            "metrics recorder not installed".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_becomes_unhealthy() {
        let mut status = HealthStatus::healthy();
        status.add_check(ComponentHealth::healthy("postgres"));
        assert!(status.is_healthy());
        assert_eq!(status.checks[0].message, None);

        status.add_check(ComponentHealth::unhealthy("postgres", "connection refused"));
        assert!(!status.is_healthy());
        assert_eq!(status.status, "unhealthy");
    }
}
