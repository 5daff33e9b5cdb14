//! 合作伙伴实体

use std::collections::HashMap;
use std::fmt;

/// 属性名到属性值的映射；未找到属性时为空映射
pub type AttributeMap = HashMap<String, String>;

/// 合作伙伴身份
///
/// `id == 0` 或 `code` 为空表示未知。解析成功的身份两者都已知。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PartnerIdentity {
    pub id: i32,
    pub code: String,
}

impl PartnerIdentity {
    pub fn new(id: i32, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
        }
    }

    /// id 和 code 是否都已知
    pub fn is_complete(&self) -> bool {
        self.id > 0 && !self.code.is_empty()
    }
}

impl fmt::Display for PartnerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.id)
    }
}

/// 组合查询的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerData {
    pub identity: PartnerIdentity,
    pub attributes: AttributeMap,
}

impl PartnerData {
    pub fn new(identity: PartnerIdentity, attributes: AttributeMap) -> Self {
        Self {
            identity,
            attributes,
        }
    }
}
