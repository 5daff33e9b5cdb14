//! gRPC 客户端

pub mod partner {
    tonic::include_proto!("partner.v1");
}

use async_trait::async_trait;
use partner::partner_service_client::PartnerServiceClient;
use partner::{IdRequest, KeyValueRequest, PartnerDataReply};
use tonic::Status;
use tonic::transport::{Channel, Endpoint};

/// 上游合作伙伴服务
#[async_trait]
pub trait PartnerUpstream: Send + Sync {
    async fn get_partner_data_by_key_value(&self, request: KeyValueRequest) -> Result<PartnerDataReply, Status>;

    async fn get_data_by_id(&self, request: IdRequest) -> Result<PartnerDataReply, Status>;

    /// 上游是否可连接
    async fn is_ready(&self) -> bool;
}

/// 基于 tonic 通道的上游客户端
#[derive(Clone)]
pub struct GrpcPartnerClient {
    endpoint: Endpoint,
    client: PartnerServiceClient<Channel>,
}

impl GrpcPartnerClient {
    /// 创建延迟连接的客户端，首次请求时建立连接
    pub fn connect_lazy(upstream: &str) -> Result<Self, tonic::transport::Error> {
        let endpoint = Endpoint::from_shared(upstream.to_string())?;
        let channel = endpoint.connect_lazy();
        Ok(Self {
            endpoint,
            client: PartnerServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl PartnerUpstream for GrpcPartnerClient {
    async fn get_partner_data_by_key_value(&self, request: KeyValueRequest) -> Result<PartnerDataReply, Status> {
        let mut client = self.client.clone();
        Ok(client.get_partner_data_by_key_value(request).await?.into_inner())
    }

    async fn get_data_by_id(&self, request: IdRequest) -> Result<PartnerDataReply, Status> {
        let mut client = self.client.clone();
        Ok(client.get_data_by_id(request).await?.into_inner())
    }

    async fn is_ready(&self) -> bool {
        self.endpoint.connect().await.is_ok()
    }
}
