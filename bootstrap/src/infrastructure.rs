//! 基础设施资源管理

use std::time::Duration;

use partner_adapter_postgres::{PostgresConfig, create_pool};
pub use partner_adapter_postgres::{PoolStatus, pool_status};
use partner_config::{AppConfig, DatabaseConfig};
use partner_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
///
/// 连接池内部已是引用计数，克隆代价很低
#[derive(Clone)]
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        let pg_config = postgres_config(&config.database, &config.app_name);
        let postgres_pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    pub fn pool_status(&self) -> PoolStatus {
        pool_status(&self.postgres_pool)
    }
}

/// 将应用层数据库配置转换为适配器配置
pub fn postgres_config(database: &DatabaseConfig, app_name: &str) -> PostgresConfig {
    let config = match database.explicit_url() {
        Some(url) => PostgresConfig::new(url),
        None => {
            let config = PostgresConfig::from_components(
                database.host.clone(),
                database.port,
                database.database.clone(),
                database.user.clone(),
            );
            match &database.password {
                Some(password) => config.with_password(password.expose_secret().clone()),
                None => config,
            }
        }
    };

    config
        .with_max_connections(database.max_connections)
        .with_acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .with_application_name(app_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn test_postgres_config_from_components() {
        let database = DatabaseConfig {
            host: "db.internal".to_string(),
            user: "spam".to_string(),
            password: Some(Secret::new("mapsmaps".to_string())),
            database: "settings".to_string(),
            max_connections: 7,
            acquire_timeout_secs: 3,
            ..Default::default()
        };

        let config = postgres_config(&database, "partner-service");
        assert_eq!(config.url, None);
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.username, "spam");
        assert_eq!(config.password.as_deref(), Some("mapsmaps"));
        assert_eq!(config.pool_max, 7);
        assert_eq!(config.acquire_timeout, Duration::from_secs(3));
        assert_eq!(config.application_name.as_deref(), Some("partner-service"));
    }

    #[test]
    fn test_postgres_config_prefers_url() {
        let database = DatabaseConfig {
            url: Some(Secret::new("postgres://u:p@h:5432/d".to_string())),
            ..Default::default()
        };

        let config = postgres_config(&database, "partner-service");
        assert_eq!(config.url.as_deref(), Some("postgres://u:p@h:5432/d"));
    }
}
