//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use partner_config::AppConfig;
use partner_errors::AppResult;
use tonic::transport::Server;
use tonic::transport::server::Router;
use tracing::{error, info, warn};

use crate::health::{HealthChecker, HealthServer};
use crate::infrastructure::Infrastructure;
use crate::metrics::{MetricsRecorder, spawn_pool_metrics};
use crate::runtime::{init_runtime, shutdown_signal};

/// 连接池指标采集间隔
const POOL_METRICS_INTERVAL: Duration = Duration::from_secs(15);

/// 运行 gRPC 服务
///
/// 负责：
/// 1. 加载配置并初始化日志
/// 2. 创建基础设施资源（数据库连接池，带重试）
/// 3. 启动健康检查 HTTP 服务器（gRPC 端口 + 1000）
/// 4. 调用闭包注册 gRPC 服务
/// 5. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// run_server("config", |infra, mut server| async move {
///     let service = PartnerGrpcService::new(build_service(&infra));
///     Ok(server.add_service(PartnerServiceServer::new(service)))
/// })
/// .await
/// ```
pub async fn run_server<F, Fut>(
    config_dir: &str,
    server_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure, Server) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir)?;

    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = match MetricsRecorder::install() {
        Ok(recorder) => Some(recorder),
        Err(e) => {
            warn!(error = %e, "Metrics disabled");
            None
        }
    };

    let infra = Infrastructure::from_config(config.clone()).await?;

    let pool_metrics_handle = spawn_pool_metrics(infra.clone(), POOL_METRICS_INTERVAL);

    let health_port = config.server.port.saturating_add(1000);
    let health_server = HealthServer::new(HealthChecker::new(infra.clone()), metrics, health_port);
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.serve().await {
            error!("Health server error: {}", e);
        }
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let router = server_builder(infra, Server::builder()).await?;

    info!(%addr, "gRPC server starting");

    router.serve_with_shutdown(addr, shutdown_signal()).await?;

    health_handle.abort();
    pool_metrics_handle.abort();

    info!("Service stopped");

    Ok(())
}
