//! partner-service - 合作伙伴身份与属性解析 gRPC 服务

use std::sync::Arc;

use partner_bootstrap::{Infrastructure, run_server};
use partner_errors::AppError;
use partner_service::FILE_DESCRIPTOR_SET;
use partner_service::api::PartnerGrpcService;
use partner_service::application::{ServiceOptions, new_service};
use partner_service::infrastructure::persistence::PostgresPartnerLookup;
use partner_service::proto::partner_service_server::PartnerServiceServer;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    run_server("config", |infra: Infrastructure, mut server| async move {
        info!("Initializing partner service...");

        let lookup = Arc::new(PostgresPartnerLookup::new(infra.postgres_pool()));
        let options = ServiceOptions {
            log_requests: infra.config().telemetry.log_requests,
        };
        let service = PartnerGrpcService::new(new_service(lookup, options));

        let reflection_service = ReflectionBuilder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()
            .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))?;

        Ok(server
            .add_service(PartnerServiceServer::new(service))
            .add_service(reflection_service))
    })
    .await
}
