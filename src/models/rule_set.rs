//! Ordered collection of whitelist rules.

use super::rule::{RuleId, WhitelistRule};
use crate::error::{RuleSetError, WhitelistResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Whitelist rules in insertion order, unique by id.
///
/// Every rule held here has a value matching its declared kind.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<WhitelistRule>,
}

impl RuleSet {
    pub fn new() -> RuleSet {
        RuleSet { rules: Vec::new() }
    }

    /// Build a rule set, rejecting duplicate ids and rules whose value does
    /// not parse as their kind.
    ///
    /// Values must be stored trimmed, redundancy checks compare them as text.
    pub fn from_rules(rules: Vec<WhitelistRule>) -> WhitelistResult<RuleSet> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(&rule.id) {
                return Err(RuleSetError::DuplicateId(rule.id.clone()).into());
            }
            if rule.value != rule.value.trim() {
                return Err(RuleSetError::UntrimmedValue {
                    id: rule.id.clone(),
                    value: rule.value.clone(),
                }
                .into());
            }
            rule.target()?;
        }
        Ok(RuleSet { rules })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WhitelistRule> {
        self.rules.iter()
    }

    pub fn rules(&self) -> &[WhitelistRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: &RuleId) -> Option<&WhitelistRule> {
        self.rules.iter().find(|r| &r.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &RuleId) -> Option<&mut WhitelistRule> {
        self.rules.iter_mut().find(|r| &r.id == id)
    }

    /// Append a rule. The caller has already validated the value.
    pub(crate) fn push(&mut self, rule: WhitelistRule) -> WhitelistResult<()> {
        if self.get(&rule.id).is_some() {
            return Err(RuleSetError::DuplicateId(rule.id).into());
        }
        self.rules.push(rule);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: &RuleId) -> WhitelistResult<WhitelistRule> {
        let index = self
            .rules
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| RuleSetError::UnknownId(id.clone()))?;
        Ok(self.rules.remove(index))
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a WhitelistRule;
    type IntoIter = std::slice::Iter<'a, WhitelistRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D>(deserializer: D) -> Result<RuleSet, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            rules: Vec<WhitelistRule>,
        }
        let raw = Raw::deserialize(deserializer)?;
        RuleSet::from_rules(raw.rules).map_err(serde::de::Error::custom)
    }
}
