//! PostgreSQL 连接管理

use partner_errors::{AppError, AppResult};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use crate::config::PostgresConfig;

/// 连接池状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: usize,
}

/// 创建 PostgreSQL 连接池
pub async fn create_pool(config: &PostgresConfig) -> AppResult<PgPool> {
    let options = config.connect_options()?;
    debug!(
        host = %options.get_host(),
        database = ?options.get_database(),
        max_connections = config.pool_max,
        "Connecting to PostgreSQL"
    );

    PgPoolOptions::new()
        .max_connections(config.pool_max)
        .min_connections(config.pool_min)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect_with(options)
        .await
        .map_err(|e| AppError::database(format!("Failed to create pool: {}", e)))
}

/// 检查数据库连接
pub async fn check_connection(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| AppError::database(format!("Database health check failed: {}", e)))?;
    Ok(())
}

/// 获取连接池状态
pub fn pool_status(pool: &PgPool) -> PoolStatus {
    PoolStatus {
        size: pool.size(),
        idle: pool.num_idle(),
    }
}
