//! 领域层
//!
//! 合作伙伴实体和查找能力接口

pub mod entities;
pub mod repositories;

pub use entities::*;
pub use repositories::*;
