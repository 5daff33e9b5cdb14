mod partner;

pub use partner::{AttributeMap, PartnerData, PartnerIdentity};
