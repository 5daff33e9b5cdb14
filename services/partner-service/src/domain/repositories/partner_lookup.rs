//! 合作伙伴查找接口
//!
//! 解析器和属性选择器只依赖这个接口；SQL 细节由实现负责。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{AttributeMap, PartnerIdentity};

/// 查找失败原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no rows returned")]
    NoRows,

    #[error("{count} rows matched where exactly one was expected")]
    MultipleRows { count: usize },

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for LookupError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NoRows,
            other => Self::Backend(other.to_string()),
        }
    }
}

pub type LookupResult<T> = Result<T, LookupError>;

/// 合作伙伴查找能力
#[async_trait]
pub trait PartnerLookup: Send + Sync {
    /// 查找属性映射中 `key = key AND value = value` 的唯一合作伙伴
    ///
    /// 匹配多个合作伙伴时必须返回 `MultipleRows`，不能任选其一。
    async fn find_partner_by_key_value(&self, key: &str, value: &str) -> LookupResult<PartnerIdentity>;

    /// 查找合作伙伴的全部属性
    async fn find_attributes_for_partner(&self, partner_id: i32) -> LookupResult<AttributeMap>;

    /// 查找合作伙伴在指定属性组内的属性
    async fn find_attributes_for_partner_group(
        &self,
        partner_id: i32,
        group: &str,
    ) -> LookupResult<AttributeMap>;

    /// 按 id 或 code 查找合作伙伴，任一匹配即可
    async fn find_partner_by_id_or_code(&self, id: i32, code: &str) -> LookupResult<PartnerIdentity>;

    /// id 和 code 是否指向同一条记录
    async fn check_id_matches_code(&self, id: i32, code: &str) -> LookupResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_no_rows() {
        assert_eq!(LookupError::from(sqlx::Error::RowNotFound), LookupError::NoRows);
    }

    #[test]
    fn test_other_sqlx_errors_are_backend() {
        let err = LookupError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, LookupError::Backend(_)));
    }
}
