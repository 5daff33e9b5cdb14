//! partner-errors - 统一错误处理
//!
//! 错误类别决定 HTTP 状态码和 gRPC 状态码

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Ambiguous: {0}")]
    Ambiguous(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn ambiguous(msg: impl Into<String>) -> Self {
        Self::Ambiguous(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn external_service(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    /// 不带前缀的错误消息
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m)
            | Self::Validation(m)
            | Self::Conflict(m)
            | Self::Ambiguous(m)
            | Self::Internal(m)
            | Self::Database(m)
            | Self::ExternalService(m) => m,
        }
    }

    /// 机器可读的错误类别
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::Ambiguous(_) => "ambiguous",
            Self::Internal(_) => "internal",
            Self::Database(_) => "database",
            Self::ExternalService(_) => "external_service",
        }
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Ambiguous(_) => 422,
            Self::Internal(_) => 500,
            Self::Database(_) => 500,
            Self::ExternalService(_) => 502,
        }
    }

    /// 转换为 gRPC 状态码
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            Self::NotFound(_) => tonic::Code::NotFound,
            Self::Validation(_) => tonic::Code::InvalidArgument,
            Self::Conflict(_) => tonic::Code::AlreadyExists,
            Self::Ambiguous(_) => tonic::Code::FailedPrecondition,
            Self::Internal(_) => tonic::Code::Internal,
            Self::Database(_) => tonic::Code::Internal,
            Self::ExternalService(_) => tonic::Code::Unavailable,
        }
    }

    /// 从上游 gRPC 状态还原错误类别
    ///
    /// `Internal` 无法区分数据库错误与其他内部错误，统一还原为 `Internal`。
    pub fn from_status(status: &tonic::Status) -> Self {
        let msg = status.message().to_string();
        match status.code() {
            tonic::Code::NotFound => Self::not_found(msg),
            tonic::Code::InvalidArgument => Self::validation(msg),
            tonic::Code::AlreadyExists => Self::conflict(msg),
            tonic::Code::FailedPrecondition => Self::ambiguous(msg),
            tonic::Code::Unavailable | tonic::Code::DeadlineExceeded => Self::external_service(msg),
            _ => Self::internal(msg),
        }
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        tonic::Status::new(err.grpc_code(), err.message().to_string())
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
