//! 属性选择

use std::sync::Arc;

use crate::domain::{AttributeMap, PartnerLookup};
use crate::error::{PartnerError, ServiceResult};

/// 返回已解析合作伙伴的全部属性或某个属性组内的属性
#[derive(Clone)]
pub struct AttributeSelector {
    lookup: Arc<dyn PartnerLookup>,
}

impl AttributeSelector {
    pub fn new(lookup: Arc<dyn PartnerLookup>) -> Self {
        Self { lookup }
    }

    /// `group` 为空时返回全部属性
    ///
    /// 合作伙伴没有属性和属性组不存在都返回 `AttributesNotFound`。
    pub async fn select_attributes(&self, partner_id: i32, group: &str) -> ServiceResult<AttributeMap> {
        let group = (!group.is_empty()).then_some(group);

        let result = match group {
            None => self.lookup.find_attributes_for_partner(partner_id).await,
            Some(group) => {
                self.lookup
                    .find_attributes_for_partner_group(partner_id, group)
                    .await
            }
        };

        let attributes =
            result.map_err(|e| PartnerError::from_attribute_lookup(e, partner_id, group))?;

        if attributes.is_empty() {
            return Err(PartnerError::AttributesNotFound {
                partner_id,
                group: group.map(str::to_string),
            });
        }

        Ok(attributes)
    }
}
