//! API 层 - gRPC 服务实现

mod conversions;
mod grpc_service;

pub use grpc_service::PartnerGrpcService;
