//! gRPC 服务测试

use std::sync::Arc;

use tonic::{Code, Request};

use partner_service::api::PartnerGrpcService;
use partner_service::application::{ServiceOptions, new_service};
use partner_service::infrastructure::persistence::InMemoryPartnerLookup;
use partner_service::proto::partner_service_server::PartnerService;
use partner_service::proto::{IdRequest, KeyValueRequest};

fn grpc_service() -> PartnerGrpcService {
    PartnerGrpcService::new(new_service(
        Arc::new(InMemoryPartnerLookup::seeded()),
        ServiceOptions::default(),
    ))
}

#[tokio::test]
async fn test_key_value_reply() {
    let reply = grpc_service()
        .get_partner_data_by_key_value(Request::new(KeyValueRequest {
            key: "Currency".into(),
            value: "USD".into(),
            group: "Money".into(),
        }))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(reply.partner_id, 1);
    assert_eq!(reply.partner_code, "KOH");
    assert_eq!(reply.attributes.len(), 2);
    assert_eq!(reply.attributes["Type of Payment"], "Credit");
    assert!(reply.error.is_empty());
}

#[tokio::test]
async fn test_key_value_validation_status() {
    let status = grpc_service()
        .get_partner_data_by_key_value(Request::new(KeyValueRequest {
            key: "Currency".into(),
            value: String::new(),
            group: String::new(),
        }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_by_id_reply() {
    let reply = grpc_service()
        .get_data_by_id(Request::new(IdRequest {
            partner_id: 0,
            partner_code: "KOH".into(),
            group: "Style".into(),
        }))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(reply.partner_id, 1);
    assert_eq!(reply.partner_code, "KOH");
    assert_eq!(reply.attributes["Color"], "Blue");
}

#[tokio::test]
async fn test_status_codes_by_error_kind() {
    let service = grpc_service();

    let cases = [
        (IdRequest { partner_id: 1, partner_code: "MAC".into(), group: String::new() }, Code::AlreadyExists),
        (IdRequest { partner_id: 0, partner_code: String::new(), group: String::new() }, Code::InvalidArgument),
        (IdRequest { partner_id: 42, partner_code: String::new(), group: String::new() }, Code::NotFound),
        (IdRequest { partner_id: 1, partner_code: String::new(), group: "EDI".into() }, Code::NotFound),
    ];

    for (request, code) in cases {
        let status = service.get_data_by_id(Request::new(request)).await.unwrap_err();
        assert_eq!(status.code(), code);
    }

    let status = service
        .get_partner_data_by_key_value(Request::new(KeyValueRequest {
            key: "Currency".into(),
            value: "EUR".into(),
            group: String::new(),
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::FailedPrecondition);
    assert_eq!(status.message(), "2 partners match Currency=EUR");
}
