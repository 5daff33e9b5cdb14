//! 内存查找实现
//!
//! 用于测试和本地演示，语义与 PostgreSQL 实现一致。

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use crate::domain::{AttributeMap, LookupError, LookupResult, PartnerIdentity, PartnerLookup};

#[derive(Debug, Clone, Default)]
pub struct InMemoryPartnerLookup {
    partners: BTreeMap<i32, String>,
    /// (partner_id, key) -> value
    mappings: BTreeMap<(i32, String), String>,
    groups: BTreeMap<String, BTreeSet<String>>,
    failure: Option<String>,
}

impl InMemoryPartnerLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置数据：KOH 使用 USD 信用卡结算，MAC 和 NOR 都使用 EUR
    pub fn seeded() -> Self {
        Self::new()
            .with_partner(1, "KOH")
            .with_partner(2, "MAC")
            .with_partner(3, "NOR")
            .with_attribute(1, "Currency", "USD")
            .with_attribute(1, "Type of Payment", "Credit")
            .with_attribute(1, "Color", "Blue")
            .with_attribute(2, "Currency", "EUR")
            .with_attribute(2, "Color", "Red")
            .with_attribute(3, "Currency", "EUR")
            .with_group("Money", ["Currency", "Type of Payment"])
            .with_group("Style", ["Color"])
    }

    pub fn with_partner(mut self, id: i32, code: impl Into<String>) -> Self {
        self.partners.insert(id, code.into());
        self
    }

    pub fn with_attribute(mut self, partner_id: i32, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.mappings.insert((partner_id, key.into()), value.into());
        self
    }

    pub fn with_group<I, K>(mut self, name: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.groups
            .entry(name.into())
            .or_default()
            .extend(keys.into_iter().map(Into::into));
        self
    }

    /// 所有查找都返回后端错误
    pub fn with_backend_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn check_backend(&self) -> LookupResult<()> {
        match &self.failure {
            Some(message) => Err(LookupError::Backend(message.clone())),
            None => Ok(()),
        }
    }

    fn identity(&self, id: i32) -> Option<PartnerIdentity> {
        self.partners
            .get(&id)
            .map(|code| PartnerIdentity::new(id, code.clone()))
    }

    fn attributes_where(&self, partner_id: i32, keep: impl Fn(&str) -> bool) -> LookupResult<AttributeMap> {
        let attributes: AttributeMap = self
            .mappings
            .iter()
            .filter(|((id, key), _)| *id == partner_id && keep(key.as_str()))
            .map(|((_, key), value)| (key.clone(), value.clone()))
            .collect();

        if attributes.is_empty() {
            return Err(LookupError::NoRows);
        }
        Ok(attributes)
    }
}

#[async_trait]
impl PartnerLookup for InMemoryPartnerLookup {
    async fn find_partner_by_key_value(&self, key: &str, value: &str) -> LookupResult<PartnerIdentity> {
        self.check_backend()?;

        let mut matches: Vec<PartnerIdentity> = self
            .mappings
            .iter()
            .filter(|((_, k), v)| k == key && v.as_str() == value)
            .filter_map(|((id, _), _)| self.identity(*id))
            .collect();

        match matches.len() {
            0 => Err(LookupError::NoRows),
            1 => Ok(matches.remove(0)),
            count => Err(LookupError::MultipleRows { count }),
        }
    }

    async fn find_attributes_for_partner(&self, partner_id: i32) -> LookupResult<AttributeMap> {
        self.check_backend()?;
        self.attributes_where(partner_id, |_| true)
    }

    async fn find_attributes_for_partner_group(
        &self,
        partner_id: i32,
        group: &str,
    ) -> LookupResult<AttributeMap> {
        self.check_backend()?;
        let keys = self.groups.get(group).ok_or(LookupError::NoRows)?;
        self.attributes_where(partner_id, |key| keys.contains(key))
    }

    async fn find_partner_by_id_or_code(&self, id: i32, code: &str) -> LookupResult<PartnerIdentity> {
        self.check_backend()?;
        self.partners
            .iter()
            .find(|(pid, pcode)| **pid == id || pcode.as_str() == code)
            .map(|(pid, pcode)| PartnerIdentity::new(*pid, pcode.clone()))
            .ok_or(LookupError::NoRows)
    }

    async fn check_id_matches_code(&self, id: i32, code: &str) -> LookupResult<bool> {
        self.check_backend()?;
        Ok(self.partners.get(&id).is_some_and(|c| c == code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_key_value_reports_match_count() {
        let lookup = InMemoryPartnerLookup::seeded();

        let koh = lookup.find_partner_by_key_value("Currency", "USD").await;
        assert_eq!(koh, Ok(PartnerIdentity::new(1, "KOH")));

        let eur = lookup.find_partner_by_key_value("Currency", "EUR").await;
        assert_eq!(eur, Err(LookupError::MultipleRows { count: 2 }));

        let none = lookup.find_partner_by_key_value("Currency", "JPY").await;
        assert_eq!(none, Err(LookupError::NoRows));
    }

    #[tokio::test]
    async fn test_group_filter() {
        let lookup = InMemoryPartnerLookup::seeded();

        let money = lookup.find_attributes_for_partner_group(1, "Money").await.unwrap();
        assert_eq!(money.len(), 2);
        assert_eq!(money["Currency"], "USD");
        assert_eq!(money["Type of Payment"], "Credit");

        let unknown = lookup.find_attributes_for_partner_group(1, "EDI").await;
        assert_eq!(unknown, Err(LookupError::NoRows));

        let nor_style = lookup.find_attributes_for_partner_group(3, "Style").await;
        assert_eq!(nor_style, Err(LookupError::NoRows));
    }

    #[tokio::test]
    async fn test_id_or_code() {
        let lookup = InMemoryPartnerLookup::seeded();

        assert_eq!(
            lookup.find_partner_by_id_or_code(0, "MAC").await,
            Ok(PartnerIdentity::new(2, "MAC"))
        );
        assert_eq!(
            lookup.find_partner_by_id_or_code(3, "").await,
            Ok(PartnerIdentity::new(3, "NOR"))
        );
        assert_eq!(lookup.find_partner_by_id_or_code(9, "ZZZ").await, Err(LookupError::NoRows));

        assert_eq!(lookup.check_id_matches_code(1, "KOH").await, Ok(true));
        assert_eq!(lookup.check_id_matches_code(1, "MAC").await, Ok(false));
    }

    #[tokio::test]
    async fn test_backend_failure() {
        let lookup = InMemoryPartnerLookup::seeded().with_backend_failure("connection refused");
        assert_eq!(
            lookup.check_id_matches_code(1, "KOH").await,
            Err(LookupError::Backend("connection refused".into()))
        );
    }
}
