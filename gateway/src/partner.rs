//! 合作伙伴数据路由
//!
//! REST 请求转发到上游 gRPC 服务，错误按 gRPC 状态码映射为 HTTP 状态码。

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use partner_errors::AppError;
use serde::{Deserialize, Serialize};
use tonic::Status;
use tracing::warn;

use crate::grpc::PartnerUpstream;
use crate::grpc::partner::{IdRequest, KeyValueRequest, PartnerDataReply};

pub type SharedUpstream = Arc<dyn PartnerUpstream>;

pub fn partner_routes() -> Router<SharedUpstream> {
    Router::new()
        .route("/v1/partner/keyvalue", get(key_value_query).post(key_value_body))
        .route("/v1/partner/id", get(by_id_query).post(by_id_body))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct KeyValueParams {
    pub key: String,
    pub value: String,
    pub group: String,
}

impl From<KeyValueParams> for KeyValueRequest {
    fn from(params: KeyValueParams) -> Self {
        Self {
            key: params.key,
            value: params.value,
            group: params.group,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdParams {
    pub partner_id: i32,
    pub partner_code: String,
    pub group: String,
}

impl From<IdParams> for IdRequest {
    fn from(params: IdParams) -> Self {
        Self {
            partner_id: params.partner_id,
            partner_code: params.partner_code,
            group: params.group,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartnerDataResponse {
    pub partner_id: i32,
    pub partner_code: String,
    pub attributes: HashMap<String, String>,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl From<PartnerDataReply> for PartnerDataResponse {
    fn from(reply: PartnerDataReply) -> Self {
        Self {
            partner_id: reply.partner_id,
            partner_code: reply.partner_code,
            attributes: reply.attributes,
            error: reply.error,
            error_kind: None,
        }
    }
}

/// 上游调用结果转换为 HTTP 响应
fn respond(result: Result<PartnerDataReply, Status>) -> Response {
    match result {
        Ok(reply) => Json(PartnerDataResponse::from(reply)).into_response(),
        Err(status) => {
            let err = AppError::from_status(&status);
            if err.status_code() >= 500 {
                warn!(grpc_code = ?status.code(), error = %status.message(), "Upstream call failed");
            }
            failure(err)
        }
    }
}

/// 失败响应：零值身份和空属性
fn failure(err: AppError) -> Response {
    let code = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = PartnerDataResponse {
        error: err.message().to_string(),
        error_kind: Some(err.kind().to_string()),
        ..Default::default()
    };
    (code, Json(body)).into_response()
}

/// 请求参数无法解析时按校验错误返回
fn reject(rejection: impl std::fmt::Display) -> Response {
    failure(AppError::validation(rejection.to_string()))
}

async fn key_value_query(
    State(upstream): State<SharedUpstream>,
    params: Result<Query<KeyValueParams>, QueryRejection>,
) -> Response {
    match params {
        Ok(Query(params)) => respond(upstream.get_partner_data_by_key_value(params.into()).await),
        Err(rejection) => reject(rejection),
    }
}

async fn key_value_body(
    State(upstream): State<SharedUpstream>,
    params: Result<Json<KeyValueParams>, JsonRejection>,
) -> Response {
    match params {
        Ok(Json(params)) => respond(upstream.get_partner_data_by_key_value(params.into()).await),
        Err(rejection) => reject(rejection),
    }
}

async fn by_id_query(
    State(upstream): State<SharedUpstream>,
    params: Result<Query<IdParams>, QueryRejection>,
) -> Response {
    match params {
        Ok(Query(params)) => respond(upstream.get_data_by_id(params.into()).await),
        Err(rejection) => reject(rejection),
    }
}

async fn by_id_body(
    State(upstream): State<SharedUpstream>,
    params: Result<Json<IdParams>, JsonRejection>,
) -> Response {
    match params {
        Ok(Json(params)) => respond(upstream.get_data_by_id(params.into()).await),
        Err(rejection) => reject(rejection),
    }
}
