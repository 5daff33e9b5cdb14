//! Proto 与应用层之间的转换

use partner_errors::AppError;
use tonic::Status;

use crate::application::{IdentityQuery, KeyValueQuery};
use crate::domain::PartnerData;
use crate::error::PartnerError;
use crate::proto::{IdRequest, KeyValueRequest, PartnerDataReply};

impl From<KeyValueRequest> for KeyValueQuery {
    fn from(req: KeyValueRequest) -> Self {
        Self {
            key: req.key,
            value: req.value,
            group: req.group,
        }
    }
}

impl From<IdRequest> for IdentityQuery {
    fn from(req: IdRequest) -> Self {
        Self {
            partner_id: req.partner_id,
            partner_code: req.partner_code,
            group: req.group,
        }
    }
}

impl From<PartnerData> for PartnerDataReply {
    fn from(data: PartnerData) -> Self {
        Self {
            partner_id: data.identity.id,
            partner_code: data.identity.code,
            attributes: data.attributes,
            error: String::new(),
        }
    }
}

// 错误统一经 AppError 映射为 gRPC 状态码
pub fn status_from_error(err: PartnerError) -> Status {
    AppError::from(err).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PartnerIdentity;
    use std::collections::HashMap;
    use tonic::Code;

    #[test]
    fn test_reply_carries_identity_and_attributes() {
        let data = PartnerData::new(
            PartnerIdentity::new(1, "KOH"),
            HashMap::from([("Currency".to_string(), "USD".to_string())]),
        );
        let reply = PartnerDataReply::from(data);
        assert_eq!(reply.partner_id, 1);
        assert_eq!(reply.partner_code, "KOH");
        assert_eq!(reply.attributes["Currency"], "USD");
        assert!(reply.error.is_empty());
    }

    #[test]
    fn test_status_codes() {
        let status = status_from_error(PartnerError::validation("key", "must not be empty"));
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "invalid key: must not be empty");

        let status = status_from_error(PartnerError::Conflict {
            id: 1,
            code: "MAC".into(),
        });
        assert_eq!(status.code(), Code::AlreadyExists);

        let status = status_from_error(PartnerError::Ambiguous {
            key: "Currency".into(),
            value: "EUR".into(),
            matches: 2,
        });
        assert_eq!(status.code(), Code::FailedPrecondition);

        let status = status_from_error(PartnerError::Lookup {
            message: "pool timed out".into(),
        });
        assert_eq!(status.code(), Code::Internal);
    }
}
