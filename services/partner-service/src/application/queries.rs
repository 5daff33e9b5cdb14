//! 查询定义

/// 按属性键值对查询合作伙伴
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueQuery {
    pub key: String,
    pub value: String,
    /// 为空时返回全部属性
    pub group: String,
}

impl KeyValueQuery {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            group: String::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }
}

/// 按 id 和/或 code 查询合作伙伴
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityQuery {
    /// 小于等于 0 视为未提供
    pub partner_id: i32,
    pub partner_code: String,
    pub group: String,
}

impl IdentityQuery {
    pub fn new(partner_id: i32, partner_code: impl Into<String>) -> Self {
        Self {
            partner_id,
            partner_code: partner_code.into(),
            group: String::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }
}
