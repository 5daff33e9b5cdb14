//! 应用层
//!
//! 解析器、属性选择器和请求编排

mod attribute_selector;
mod middleware;
mod queries;
mod resolver;
mod service;

use std::sync::Arc;

pub use attribute_selector::AttributeSelector;
pub use middleware::LoggingMiddleware;
pub use queries::{IdentityQuery, KeyValueQuery};
pub use resolver::Resolver;
pub use service::{PartnerService, PartnerServiceImpl};

use crate::domain::PartnerLookup;

/// 服务组装选项
#[derive(Debug, Clone, Copy)]
pub struct ServiceOptions {
    /// 是否包装请求日志装饰器
    pub log_requests: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self { log_requests: true }
    }
}

/// 组装合作伙伴数据服务
pub fn new_service(lookup: Arc<dyn PartnerLookup>, options: ServiceOptions) -> Arc<dyn PartnerService> {
    let service = PartnerServiceImpl::new(lookup);
    if options.log_requests {
        Arc::new(LoggingMiddleware::new(service))
    } else {
        Arc::new(service)
    }
}
