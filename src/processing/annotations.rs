//! "Contained by" annotations for the rule list view.

use super::containment::{address_in_cidr, cidr_contains_cidr};
use crate::models::{RuleId, RuleSet, RuleTarget, WhitelistRule};
use std::collections::BTreeMap;

/// Map each rule id to the value of the first *other* CIDR rule covering it.
///
/// Single rules are matched with [`address_in_cidr`], CIDR rules with
/// [`cidr_contains_cidr`]. Self is excluded by id, so two rules with the
/// same value annotate each other. Rules not covered have no entry.
pub fn compute_containment_annotations(rules: &RuleSet) -> BTreeMap<RuleId, String> {
    let containers: Vec<(&WhitelistRule, _)> = rules
        .iter()
        .filter_map(|r| r.cidr_block().map(|block| (r, block)))
        .collect();

    let mut annotations = BTreeMap::new();
    for rule in rules {
        let Ok(target) = rule.target() else {
            continue;
        };
        let container = containers
            .iter()
            .filter(|(other, _)| other.id != rule.id)
            .find(|(_, outer)| match target {
                RuleTarget::Address(ip) => address_in_cidr(ip, outer),
                RuleTarget::Block(inner) => cidr_contains_cidr(&inner, outer),
            });
        if let Some((other, _)) = container {
            log::trace!("rule {} ({}) contained by {}", rule.id, rule.value, other.value);
            annotations.insert(rule.id.clone(), other.value.clone());
        }
    }
    log::debug!(
        "{} of {} rules are contained by another rule",
        annotations.len(),
        rules.len()
    );
    annotations
}
