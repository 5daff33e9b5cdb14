//! Partner API Gateway
//!
//! 把 REST 请求转发到 partner-service gRPC 服务

mod grpc;
mod middleware;
mod partner;
mod routing;

use std::net::SocketAddr;
use std::sync::Arc;

use partner_bootstrap::{init_runtime, shutdown_signal};
use partner_config::AppConfig;
use tracing::info;

use grpc::GrpcPartnerClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load("config")?;
    init_runtime(&config);

    let gateway = &config.gateway;

    info!(upstream = %gateway.upstream_endpoint, "Using partner service upstream");
    let upstream = GrpcPartnerClient::connect_lazy(&gateway.upstream_endpoint)?;

    let app = routing::app(gateway, Arc::new(upstream));

    let addr: SocketAddr = format!("{}:{}", gateway.host, gateway.port).parse()?;
    info!(%addr, "Starting gateway");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
