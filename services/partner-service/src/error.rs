//! 服务错误定义

use partner_errors::AppError;
use thiserror::Error;

use crate::domain::LookupError;

/// 错误分类，决定传输层状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Ambiguous,
    Lookup,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Ambiguous => "ambiguous",
            Self::Lookup => "lookup",
        }
    }
}

/// 合作伙伴解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartnerError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("partner not found for {lookup}")]
    PartnerNotFound { lookup: String },

    #[error("no attributes found for partner {partner_id}{}", group_suffix(.group))]
    AttributesNotFound {
        partner_id: i32,
        group: Option<String>,
    },

    #[error("{matches} partners match {key}={value}")]
    Ambiguous {
        key: String,
        value: String,
        matches: usize,
    },

    #[error("partner id {id} does not match code {code}")]
    Conflict { id: i32, code: String },

    #[error("lookup failed: {message}")]
    Lookup { message: String },
}

fn group_suffix(group: &Option<String>) -> String {
    match group {
        Some(group) => format!(" in group {}", group),
        None => String::new(),
    }
}

impl PartnerError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::PartnerNotFound { .. } | Self::AttributesNotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Ambiguous { .. } => ErrorKind::Ambiguous,
            Self::Lookup { .. } => ErrorKind::Lookup,
        }
    }

    /// 把按键值对查找合作伙伴的失败转换为服务错误
    pub(crate) fn from_key_value_lookup(err: LookupError, key: &str, value: &str) -> Self {
        match err {
            LookupError::NoRows => Self::PartnerNotFound {
                lookup: format!("{}={}", key, value),
            },
            LookupError::MultipleRows { count } => Self::Ambiguous {
                key: key.to_string(),
                value: value.to_string(),
                matches: count,
            },
            LookupError::Backend(message) => Self::Lookup { message },
        }
    }

    /// 把按 id/code 查找合作伙伴的失败转换为服务错误
    pub(crate) fn from_identity_lookup(err: LookupError, id: i32, code: &str) -> Self {
        match err {
            LookupError::NoRows => Self::PartnerNotFound {
                lookup: format!("id={} code={}", id, code),
            },
            LookupError::Backend(message) => Self::Lookup { message },
            other => Self::Lookup {
                message: other.to_string(),
            },
        }
    }

    /// 把属性查找失败转换为服务错误
    pub(crate) fn from_attribute_lookup(
        err: LookupError,
        partner_id: i32,
        group: Option<&str>,
    ) -> Self {
        match err {
            LookupError::NoRows => Self::AttributesNotFound {
                partner_id,
                group: group.map(str::to_string),
            },
            LookupError::Backend(message) => Self::Lookup { message },
            other => Self::Lookup {
                message: other.to_string(),
            },
        }
    }
}

impl From<PartnerError> for AppError {
    fn from(err: PartnerError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => AppError::validation(message),
            ErrorKind::NotFound => AppError::not_found(message),
            ErrorKind::Conflict => AppError::conflict(message),
            ErrorKind::Ambiguous => AppError::ambiguous(message),
            ErrorKind::Lookup => AppError::internal(message),
        }
    }
}

pub type ServiceResult<T> = Result<T, PartnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_map_to_distinct_app_errors() {
        let cases = [
            (PartnerError::validation("key", "must not be empty"), 400),
            (
                PartnerError::PartnerNotFound {
                    lookup: "Currency=USD".into(),
                },
                404,
            ),
            (
                PartnerError::AttributesNotFound {
                    partner_id: 1,
                    group: Some("Money".into()),
                },
                404,
            ),
            (
                PartnerError::Conflict {
                    id: 1,
                    code: "XYZ".into(),
                },
                409,
            ),
            (
                PartnerError::Ambiguous {
                    key: "Currency".into(),
                    value: "USD".into(),
                    matches: 2,
                },
                422,
            ),
            (
                PartnerError::Lookup {
                    message: "connection reset".into(),
                },
                500,
            ),
        ];

        for (err, status) in cases {
            let app: AppError = err.into();
            assert_eq!(app.status_code(), status);
        }
    }

    #[test]
    fn test_multiple_rows_becomes_ambiguous() {
        let err =
            PartnerError::from_key_value_lookup(LookupError::MultipleRows { count: 3 }, "Currency", "USD");
        assert_eq!(
            err,
            PartnerError::Ambiguous {
                key: "Currency".into(),
                value: "USD".into(),
                matches: 3,
            }
        );
        assert_eq!(err.kind(), ErrorKind::Ambiguous);
    }

    #[test]
    fn test_missing_attributes_message_names_group() {
        let err = PartnerError::from_attribute_lookup(LookupError::NoRows, 1, Some("Style"));
        assert_eq!(err.to_string(), "no attributes found for partner 1 in group Style");

        let err = PartnerError::from_attribute_lookup(LookupError::NoRows, 1, None);
        assert_eq!(err.to_string(), "no attributes found for partner 1");
    }

    #[test]
    fn test_backend_failure_is_lookup_error() {
        let err = PartnerError::from_attribute_lookup(LookupError::Backend("timeout".into()), 1, None);
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }
}
