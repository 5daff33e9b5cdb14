//! 查找能力接口模块

mod partner_lookup;

pub use partner_lookup::{LookupError, LookupResult, PartnerLookup};
