//! 请求日志装饰器
//!
//! 包装任意 `PartnerService`，每次调用结束后输出一条结构化日志，不改变结果。

use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::PartnerData;
use crate::error::ServiceResult;

use super::queries::{IdentityQuery, KeyValueQuery};
use super::service::PartnerService;

pub struct LoggingMiddleware<S> {
    inner: S,
}

impl<S> LoggingMiddleware<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

fn log_call(method: &'static str, result: &ServiceResult<PartnerData>, started: Instant) {
    let took_ms = started.elapsed().as_secs_f64() * 1000.0;
    match result {
        Ok(data) => info!(
            method,
            id = data.identity.id,
            code = %data.identity.code,
            attributes = ?data.attributes,
            err = "none",
            took_ms,
            "partner request"
        ),
        Err(e) => {
            let empty = PartnerData::default();
            warn!(
                method,
                id = empty.identity.id,
                code = %empty.identity.code,
                attributes = ?empty.attributes,
                err = %e,
                kind = e.kind().as_str(),
                took_ms,
                "partner request"
            )
        }
    }
}

#[async_trait]
impl<S: PartnerService> PartnerService for LoggingMiddleware<S> {
    async fn get_partner_data_by_key_value(&self, query: KeyValueQuery) -> ServiceResult<PartnerData> {
        let started = Instant::now();
        let result = self.inner.get_partner_data_by_key_value(query).await;
        log_call("KeyValue", &result, started);
        result
    }

    async fn get_data_by_id(&self, query: IdentityQuery) -> ServiceResult<PartnerData> {
        let started = Instant::now();
        let result = self.inner.get_data_by_id(query).await;
        log_call("ById", &result, started);
        result
    }
}
