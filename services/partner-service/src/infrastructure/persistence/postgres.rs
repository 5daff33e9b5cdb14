//! PostgreSQL 查找实现

use std::time::Instant;

use async_trait::async_trait;
use partner_telemetry::record_db_query;
use sqlx::PgPool;
use tracing::debug;

use crate::domain::{AttributeMap, LookupError, LookupResult, PartnerIdentity, PartnerLookup};

use super::rows::{AttributeRow, PartnerRow, attributes_from_rows};

pub struct PostgresPartnerLookup {
    pool: PgPool,
}

impl PostgresPartnerLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 记录查询耗时和结果
fn observe<T>(operation: &str, started: Instant, result: &Result<T, sqlx::Error>) {
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    record_db_query(operation, elapsed_ms, result.is_ok());
}

fn require_rows(rows: Vec<AttributeRow>) -> LookupResult<AttributeMap> {
    if rows.is_empty() {
        return Err(LookupError::NoRows);
    }
    Ok(attributes_from_rows(rows))
}

#[async_trait]
impl PartnerLookup for PostgresPartnerLookup {
    async fn find_partner_by_key_value(&self, key: &str, value: &str) -> LookupResult<PartnerIdentity> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, PartnerRow>(
            r#"
            SELECT DISTINCT partners.id, partners.code
            FROM partner_mappings
            INNER JOIN partners ON partners.id = partner_mappings.partner_id
            WHERE partner_mappings.key_id = (SELECT id FROM keys WHERE name = $1 LIMIT 1)
              AND partner_mappings.value = $2
            ORDER BY partners.id
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_all(&self.pool)
        .await;
        observe("find_partner_by_key_value", started, &result);

        let mut rows = result?;
        debug!(key, value, matches = rows.len(), "Partner key/value lookup");

        match rows.len() {
            0 => Err(LookupError::NoRows),
            1 => Ok(rows.remove(0).into()),
            count => Err(LookupError::MultipleRows { count }),
        }
    }

    async fn find_attributes_for_partner(&self, partner_id: i32) -> LookupResult<AttributeMap> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, AttributeRow>(
            r#"
            SELECT keys.name, partner_mappings.value
            FROM partner_mappings
            INNER JOIN keys ON keys.id = partner_mappings.key_id
            WHERE partner_mappings.partner_id = $1
            "#,
        )
        .bind(partner_id)
        .fetch_all(&self.pool)
        .await;
        observe("find_attributes_for_partner", started, &result);

        require_rows(result?)
    }

    async fn find_attributes_for_partner_group(
        &self,
        partner_id: i32,
        group: &str,
    ) -> LookupResult<AttributeMap> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, AttributeRow>(
            r#"
            SELECT keys.name, partner_mappings.value
            FROM partner_mappings
            INNER JOIN keys ON keys.id = partner_mappings.key_id
            WHERE partner_mappings.partner_id = $1
              AND partner_mappings.key_id = ANY(
                  SELECT key_id FROM groups_to_keys
                  WHERE group_id = (SELECT id FROM groups WHERE name = $2 LIMIT 1)
              )
            "#,
        )
        .bind(partner_id)
        .bind(group)
        .fetch_all(&self.pool)
        .await;
        observe("find_attributes_for_partner_group", started, &result);

        require_rows(result?)
    }

    async fn find_partner_by_id_or_code(&self, id: i32, code: &str) -> LookupResult<PartnerIdentity> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, PartnerRow>(
            r#"
            SELECT id, code
            FROM partners
            WHERE id = $1 OR code = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await;
        observe("find_partner_by_id_or_code", started, &result);

        result?.map(Into::into).ok_or(LookupError::NoRows)
    }

    async fn check_id_matches_code(&self, id: i32, code: &str) -> LookupResult<bool> {
        let started = Instant::now();
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM partners WHERE id = $1 AND code = $2)",
        )
        .bind(id)
        .bind(code)
        .fetch_one(&self.pool)
        .await;
        observe("check_id_matches_code", started, &result);

        Ok(result?)
    }
}
