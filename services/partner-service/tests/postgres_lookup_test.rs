//! PostgreSQL 查找集成测试
//!
//! 需要 DATABASE_URL 指向可用的 PostgreSQL：
//! `cargo test -p partner-service --test postgres_lookup_test -- --ignored`

use sqlx::PgPool;

use partner_service::domain::{LookupError, PartnerIdentity, PartnerLookup};
use partner_service::infrastructure::persistence::PostgresPartnerLookup;

const SCHEMA: &str = include_str!("../sql/schema.sql");
const SEED: &str = include_str!("../sql/seed.sql");

async fn seeded_lookup(pool: PgPool) -> PostgresPartnerLookup {
    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();
    sqlx::raw_sql(SEED).execute(&pool).await.unwrap();
    PostgresPartnerLookup::new(pool)
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL"]
async fn test_find_partner_by_key_value(pool: PgPool) {
    let lookup = seeded_lookup(pool).await;

    assert_eq!(
        lookup.find_partner_by_key_value("Currency", "USD").await,
        Ok(PartnerIdentity::new(1, "KOH"))
    );
    assert_eq!(
        lookup.find_partner_by_key_value("Currency", "EUR").await,
        Err(LookupError::MultipleRows { count: 2 })
    );
    assert_eq!(
        lookup.find_partner_by_key_value("Currency", "JPY").await,
        Err(LookupError::NoRows)
    );
    assert_eq!(
        lookup.find_partner_by_key_value("Unknown", "USD").await,
        Err(LookupError::NoRows)
    );
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL"]
async fn test_find_attributes(pool: PgPool) {
    let lookup = seeded_lookup(pool).await;

    let all = lookup.find_attributes_for_partner(1).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all["Color"], "Blue");

    let money = lookup.find_attributes_for_partner_group(1, "Money").await.unwrap();
    assert_eq!(money.len(), 2);
    assert_eq!(money["Currency"], "USD");
    assert_eq!(money["Type of Payment"], "Credit");

    assert_eq!(
        lookup.find_attributes_for_partner_group(1, "EDI").await,
        Err(LookupError::NoRows)
    );
    assert_eq!(lookup.find_attributes_for_partner(99).await, Err(LookupError::NoRows));
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL"]
async fn test_find_partner_by_id_or_code(pool: PgPool) {
    let lookup = seeded_lookup(pool).await;

    assert_eq!(
        lookup.find_partner_by_id_or_code(0, "MAC").await,
        Ok(PartnerIdentity::new(2, "MAC"))
    );
    assert_eq!(
        lookup.find_partner_by_id_or_code(3, "").await,
        Ok(PartnerIdentity::new(3, "NOR"))
    );
    assert_eq!(
        lookup.find_partner_by_id_or_code(99, "ZZZ").await,
        Err(LookupError::NoRows)
    );
}

#[sqlx::test(migrations = false)]
#[ignore = "requires PostgreSQL"]
async fn test_check_id_matches_code(pool: PgPool) {
    let lookup = seeded_lookup(pool).await;

    assert_eq!(lookup.check_id_matches_code(1, "KOH").await, Ok(true));
    assert_eq!(lookup.check_id_matches_code(1, "MAC").await, Ok(false));
    assert_eq!(lookup.check_id_matches_code(99, "KOH").await, Ok(false));
}
