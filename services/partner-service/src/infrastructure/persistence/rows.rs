//! 数据库行映射结构

use sqlx::FromRow;

use crate::domain::{AttributeMap, PartnerIdentity};

/// 合作伙伴数据库行
#[derive(Debug, FromRow)]
pub struct PartnerRow {
    pub id: i32,
    pub code: String,
}

impl From<PartnerRow> for PartnerIdentity {
    fn from(row: PartnerRow) -> Self {
        PartnerIdentity::new(row.id, row.code)
    }
}

/// 属性数据库行
#[derive(Debug, FromRow)]
pub struct AttributeRow {
    pub name: String,
    pub value: String,
}

pub fn attributes_from_rows(rows: Vec<AttributeRow>) -> AttributeMap {
    rows.into_iter().map(|row| (row.name, row.value)).collect()
}
