//! 请求编排
//!
//! 两个组合操作都是 解析 → 属性选择 的直线流程，任一阶段失败即停止。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{PartnerData, PartnerLookup};
use crate::error::ServiceResult;

use super::attribute_selector::AttributeSelector;
use super::queries::{IdentityQuery, KeyValueQuery};
use super::resolver::Resolver;

/// 合作伙伴数据服务
#[async_trait]
pub trait PartnerService: Send + Sync {
    async fn get_partner_data_by_key_value(&self, query: KeyValueQuery) -> ServiceResult<PartnerData>;

    async fn get_data_by_id(&self, query: IdentityQuery) -> ServiceResult<PartnerData>;
}

pub struct PartnerServiceImpl {
    resolver: Resolver,
    selector: AttributeSelector,
}

impl PartnerServiceImpl {
    pub fn new(lookup: Arc<dyn PartnerLookup>) -> Self {
        Self {
            resolver: Resolver::new(lookup.clone()),
            selector: AttributeSelector::new(lookup),
        }
    }
}

#[async_trait]
impl PartnerService for PartnerServiceImpl {
    async fn get_partner_data_by_key_value(&self, query: KeyValueQuery) -> ServiceResult<PartnerData> {
        let identity = self
            .resolver
            .resolve_by_key_value(&query.key, &query.value)
            .await?;
        let attributes = self
            .selector
            .select_attributes(identity.id, &query.group)
            .await?;
        Ok(PartnerData::new(identity, attributes))
    }

    async fn get_data_by_id(&self, query: IdentityQuery) -> ServiceResult<PartnerData> {
        let identity = self
            .resolver
            .resolve_by_identity(query.partner_id, &query.partner_code)
            .await?;
        let attributes = self
            .selector
            .select_attributes(identity.id, &query.group)
            .await?;
        Ok(PartnerData::new(identity, attributes))
    }
}
