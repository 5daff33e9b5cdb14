//! Metrics 模块
//!
//! 提供 Prometheus metrics 导出

use std::time::Duration;

use metrics::gauge;
use metrics_exporter_prometheus::PrometheusHandle;
use partner_errors::{AppError, AppResult};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::infrastructure::Infrastructure;

/// Metrics 记录器
#[derive(Clone)]
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus 记录器
    pub fn install() -> AppResult<Self> {
        let handle = partner_telemetry::init_metrics()
            .map_err(|e| AppError::internal(format!("Failed to install Prometheus recorder: {}", e)))?;
        Ok(Self { handle })
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 设置连接池指标
pub fn set_pool_metrics(pool_name: &str, size: u32, idle: usize) {
    let labels = [("pool", pool_name.to_string())];
    gauge!("connection_pool_size", &labels).set(size as f64);
    gauge!("connection_pool_idle", &labels).set(idle as f64);
}

/// 周期性采集连接池指标
pub fn spawn_pool_metrics(infra: Infrastructure, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let status = infra.pool_status();
            debug!(size = status.size, idle = status.idle, "Collected pool metrics");
            set_pool_metrics("postgres", status.size, status.idle);
        }
    })
}
