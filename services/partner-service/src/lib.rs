//! partner-service - 合作伙伴身份与属性解析服务
//!
//! 调用方通过属性键值对或合作伙伴 id/code 定位合作伙伴，
//! 可选地按属性组过滤返回的属性。

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Proto generated code modules
pub mod partner {
    pub mod v1 {
        tonic::include_proto!("partner.v1");
    }
}

pub use partner::v1 as proto;

pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("partner_descriptor");
