//! partner-config - 配置加载库
//!
//! 加载顺序（后者覆盖前者）：
//! 1. `{config_dir}/default.toml`
//! 2. `{config_dir}/{APP_ENV}.toml`
//! 3. 兼容旧部署的 `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_DATABASE`
//! 4. `PARTNER__<SECTION>__<KEY>` 形式的环境变量

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
///
/// 设置了 `url` 时优先使用 URL，否则由各组件拼装连接参数。
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<Secret<String>>,
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default = "default_db_user")]
    pub user: String,
    #[serde(default)]
    pub password: Option<Secret<String>>,
    #[serde(default = "default_db_name")]
    pub database: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// 获取连接的最长等待时间
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_name() -> String {
    "partner_service".to_string()
}

fn default_max_connections() -> u32 {
    // 开发环境: 10, 生产环境: 50
    match std::env::var("APP_ENV").as_deref() {
        Ok("production") => 50,
        _ => 10,
    }
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: None,
            database: default_db_name(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    /// 显式配置的连接 URL（已去掉空字符串）
    pub fn explicit_url(&self) -> Option<&str> {
        self.url
            .as_ref()
            .map(|u| u.expose_secret().as_str())
            .filter(|u| !u.is_empty())
    }
}

/// gRPC 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8081
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

/// HTTP 网关配置
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    /// 上游 gRPC 服务地址
    #[serde(default = "default_upstream")]
    pub upstream_endpoint: String,
    /// swagger 静态文件目录
    #[serde(default = "default_swagger_dir")]
    pub swagger_dir: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

fn default_gateway_port() -> u16 {
    8080
}

fn default_upstream() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_swagger_dir() -> String {
    "./swagger".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_gateway_port(),
            upstream_endpoint: default_upstream(),
            swagger_dir: default_swagger_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 是否为每次调用记录结果日志
    #[serde(default = "default_log_requests")]
    pub log_requests: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_requests() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_requests: default_log_requests(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    pub app_env: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_app_name() -> String {
    "partner-service".to_string()
}

/// 旧部署使用的数据库环境变量（去掉 `DB_` 前缀后）
const LEGACY_DB_KEYS: &[&str] = &["host", "port", "user", "password", "database"];

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config: Self = Self::figment(config_dir, &env).extract()?;

        Ok(config)
    }

    /// 构建分层配置源
    pub fn figment(config_dir: &str, env: &str) -> Figment {
        Figment::from(Serialized::default("app_env", env))
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(
                Env::prefixed("DB_")
                    .only(LEGACY_DB_KEYS)
                    .map(|key| format!("database.{}", key).into()),
            )
            .merge(Env::prefixed("PARTNER__").split("__"))
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

}

#[cfg(test)]
mod tests;
