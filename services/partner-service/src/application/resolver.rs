//! 合作伙伴身份解析

use std::sync::Arc;

use tracing::debug;

use crate::domain::{PartnerIdentity, PartnerLookup};
use crate::error::{PartnerError, ServiceResult};

/// 校验调用方输入并确定唯一的合作伙伴身份
#[derive(Clone)]
pub struct Resolver {
    lookup: Arc<dyn PartnerLookup>,
}

impl Resolver {
    pub fn new(lookup: Arc<dyn PartnerLookup>) -> Self {
        Self { lookup }
    }

    /// 通过属性键值对解析合作伙伴
    pub async fn resolve_by_key_value(&self, key: &str, value: &str) -> ServiceResult<PartnerIdentity> {
        if key.is_empty() {
            return Err(PartnerError::validation("key", "must not be empty"));
        }
        if value.is_empty() {
            return Err(PartnerError::validation("value", "must not be empty"));
        }

        let identity = self
            .lookup
            .find_partner_by_key_value(key, value)
            .await
            .map_err(|e| PartnerError::from_key_value_lookup(e, key, value))?;

        debug!(key, value, partner = %identity, "Resolved partner by key/value");

        ensure_complete(identity, || format!("{}={}", key, value))
    }

    /// 通过 id 和/或 code 解析合作伙伴
    ///
    /// 同时提供两者时先校验它们指向同一合作伙伴，不一致返回 `Conflict`。
    pub async fn resolve_by_identity(&self, id: i32, code: &str) -> ServiceResult<PartnerIdentity> {
        let id = id.max(0);

        if id == 0 && code.is_empty() {
            return Err(PartnerError::validation(
                "partner_id",
                "partner id or partner code is required",
            ));
        }

        if id > 0 && !code.is_empty() {
            let consistent = self.lookup.check_id_matches_code(id, code).await.unwrap_or(false);
            if !consistent {
                return Err(PartnerError::Conflict {
                    id,
                    code: code.to_string(),
                });
            }
        }

        let identity = self
            .lookup
            .find_partner_by_id_or_code(id, code)
            .await
            .map_err(|e| PartnerError::from_identity_lookup(e, id, code))?;

        debug!(id, code, partner = %identity, "Resolved partner by identity");

        ensure_complete(identity, || format!("id={} code={}", id, code))
    }
}

/// 查找返回的身份不完整时按未找到处理
fn ensure_complete(
    identity: PartnerIdentity,
    lookup: impl FnOnce() -> String,
) -> ServiceResult<PartnerIdentity> {
    if identity.is_complete() {
        Ok(identity)
    } else {
        Err(PartnerError::PartnerNotFound { lookup: lookup() })
    }
}
