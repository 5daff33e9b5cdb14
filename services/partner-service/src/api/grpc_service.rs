//! gRPC service implementation

use std::sync::Arc;
use std::time::Instant;

use partner_telemetry::record_rpc;
use tonic::{Request, Response, Status};

use crate::application::PartnerService;
use crate::error::ServiceResult;
use crate::proto::partner_service_server::PartnerService as PartnerServiceApi;
use crate::proto::{IdRequest, KeyValueRequest, PartnerDataReply};

use super::conversions::status_from_error;

pub struct PartnerGrpcService {
    service: Arc<dyn PartnerService>,
}

impl PartnerGrpcService {
    pub fn new(service: Arc<dyn PartnerService>) -> Self {
        Self { service }
    }
}

fn respond<T>(
    method: &str,
    started: Instant,
    result: ServiceResult<T>,
) -> Result<Response<PartnerDataReply>, Status>
where
    T: Into<PartnerDataReply>,
{
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    match result {
        Ok(data) => {
            record_rpc(method, "ok", elapsed_ms);
            Ok(Response::new(data.into()))
        }
        Err(e) => {
            record_rpc(method, e.kind().as_str(), elapsed_ms);
            Err(status_from_error(e))
        }
    }
}

#[tonic::async_trait]
impl PartnerServiceApi for PartnerGrpcService {
    async fn get_partner_data_by_key_value(
        &self,
        request: Request<KeyValueRequest>,
    ) -> Result<Response<PartnerDataReply>, Status> {
        let started = Instant::now();
        let query = request.into_inner().into();
        let result = self.service.get_partner_data_by_key_value(query).await;
        respond("GetPartnerDataByKeyValue", started, result)
    }

    async fn get_data_by_id(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<PartnerDataReply>, Status> {
        let started = Instant::now();
        let query = request.into_inner().into();
        let result = self.service.get_data_by_id(query).await;
        respond("GetDataById", started, result)
    }
}
