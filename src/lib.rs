//! IP whitelist rule engine.
//!
//! Parses IPv4 addresses and CIDR blocks, keeps private (RFC1918) ranges
//! out of the whitelist, and detects rules made redundant by other rules.
//!
//! # Module Structure
//!
//! - [`models`] - addresses, CIDR blocks, rules and rule sets
//! - [`processing`] - containment, private range, redundancy and annotation logic
//! - [`output`] - CSV and terminal rendering
//! - [`store`] - JSON rule file
//! - [`config`] - environment settings
//! - [`error`] - typed errors

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod store;

use models::RuleSet;
use std::collections::HashSet;
use std::error::Error;

/// Read the rule set from file.
///
/// # Arguments
/// * `rules_file` - Optional path to a specific rule file. If None, uses the default.
pub fn get_rule_set(rules_file: Option<&str>) -> Result<RuleSet, Box<dyn Error>> {
    let rules = store::read_rule_file(rules_file)?;
    log::debug!("Rule set has {} rules", rules.len());
    Ok(rules)
}

/// Return error if two rules carry the same value and kind.
pub fn check_for_duplicate_rules(rules: &RuleSet) -> Result<(), Box<dyn Error>> {
    let mut seen = HashSet::new();

    for rule in rules {
        if !seen.insert((rule.value.as_str(), rule.kind)) {
            return Err(format!("Duplicate found: {} {} (id {})", rule.kind, rule.value, rule.id).into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, RuleId, WhitelistRule};
    use chrono::Utc;

    #[test]
    fn test_check_for_duplicate_rules() {
        let rules = get_rule_set(Some("src/tests/test_data/whitelist_test_rules_01.json"))
            .expect("Error reading rule file");
        assert!(check_for_duplicate_rules(&rules).is_ok());

        let rule = |id: &str| {
            WhitelistRule::new(RuleId::from(id), Candidate::detect("8.8.8.8"), "", Utc::now(), "test")
        };
        let dup = RuleSet::from_rules(vec![rule("a"), rule("b")]).unwrap();
        assert_eq!(
            check_for_duplicate_rules(&dup).unwrap_err().to_string(),
            "Duplicate found: single 8.8.8.8 (id b)"
        );
    }
}
