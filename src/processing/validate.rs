//! Candidate validation and the add / edit / delete operations on a
//! [`RuleSet`].

use super::private::{cidr_overlaps_private_range, is_private_address};
use super::redundancy::check_redundancy;
use crate::error::{RuleSetError, ValidationError, WhitelistResult};
use crate::models::{Candidate, RuleId, RuleSet, RuleTarget, WhitelistRule};
use chrono::Utc;

/// Run every check an add or edit form applies, in order: parse, private
/// range, redundancy. The first failure is returned.
///
/// Pass the id of the rule being edited as `exclude_id` so it is not
/// reported as a duplicate of itself.
pub fn validate_candidate(
    candidate: &Candidate,
    rules: &RuleSet,
    exclude_id: Option<&RuleId>,
) -> WhitelistResult<RuleTarget> {
    let target = candidate.target()?;

    match target {
        RuleTarget::Address(ip) if is_private_address(ip) => {
            return Err(ValidationError::PrivateAddress(candidate.value.clone()).into());
        }
        RuleTarget::Block(block) if cidr_overlaps_private_range(&block) => {
            return Err(ValidationError::PrivateRangeOverlap(candidate.value.clone()).into());
        }
        _ => {}
    }

    check_redundancy(candidate, rules, exclude_id)?.into_result(&candidate.value)?;
    Ok(target)
}

/// Validate `candidate` and append it as a new rule.
pub fn add_rule(
    rules: &mut RuleSet,
    candidate: Candidate,
    description: &str,
    created_by: &str,
) -> WhitelistResult<WhitelistRule> {
    validate_candidate(&candidate, rules, None)?;
    let rule = WhitelistRule::new(
        RuleId::generate(),
        candidate,
        description.trim(),
        Utc::now(),
        created_by,
    );
    rules.push(rule.clone())?;
    log::info!("Added rule {} {} ({})", rule.id, rule.value, rule.kind);
    Ok(rule)
}

/// Replace value, kind and description of rule `id`.
///
/// Id, creation time and creator are left untouched.
pub fn edit_rule(
    rules: &mut RuleSet,
    id: &RuleId,
    candidate: Candidate,
    description: Option<&str>,
) -> WhitelistResult<WhitelistRule> {
    if rules.get(id).is_none() {
        return Err(RuleSetError::UnknownId(id.clone()).into());
    }
    validate_candidate(&candidate, rules, Some(id))?;

    let rule = rules
        .get_mut(id)
        .ok_or_else(|| RuleSetError::UnknownId(id.clone()))?;
    log::info!(
        "Editing rule {id}: {} ({}) -> {} ({})",
        rule.value,
        rule.kind,
        candidate.value,
        candidate.kind
    );
    rule.value = candidate.value;
    rule.kind = candidate.kind;
    if let Some(description) = description {
        rule.description = description.trim().to_string();
    }
    Ok(rule.clone())
}

/// Remove rule `id` and return it.
pub fn delete_rule(rules: &mut RuleSet, id: &RuleId) -> WhitelistResult<WhitelistRule> {
    let rule = rules.remove(id)?;
    log::info!("Deleted rule {} {}", rule.id, rule.value);
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, RedundancyError, WhitelistError};
    use crate::models::RuleKind;

    fn seeded() -> (RuleSet, RuleId, RuleId) {
        let mut rules = RuleSet::new();
        let office = add_rule(
            &mut rules,
            Candidate::new("203.119.24.0/24", RuleKind::Cidr),
            "office",
            "admin",
        )
        .unwrap();
        let vpn = add_rule(
            &mut rules,
            Candidate::new("116.228.89.156", RuleKind::Single),
            "vpn gateway",
            "admin",
        )
        .unwrap();
        (rules, office.id, vpn.id)
    }

    #[test]
    fn test_validate_public_candidate() {
        let (rules, _, _) = seeded();
        assert!(validate_candidate(&Candidate::new("8.8.8.8", RuleKind::Single), &rules, None).is_ok());
        assert!(
            validate_candidate(&Candidate::new("198.51.100.0/24", RuleKind::Cidr), &rules, None)
                .is_ok()
        );
    }

    #[test]
    fn test_validate_order_parse_first() {
        let (rules, _, _) = seeded();
        assert!(matches!(
            validate_candidate(&Candidate::new("10.0.0.300", RuleKind::Single), &rules, None),
            Err(WhitelistError::Parse(ParseError::OctetOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_validate_rejects_private() {
        let rules = RuleSet::new();
        assert_eq!(
            validate_candidate(&Candidate::new("192.168.1.1", RuleKind::Single), &rules, None)
                .unwrap_err(),
            WhitelistError::Validation(ValidationError::PrivateAddress("192.168.1.1".to_string()))
        );
        assert_eq!(
            validate_candidate(&Candidate::new("10.0.0.0/8", RuleKind::Cidr), &rules, None)
                .unwrap_err(),
            WhitelistError::Validation(ValidationError::PrivateRangeOverlap(
                "10.0.0.0/8".to_string()
            ))
        );
        assert!(matches!(
            validate_candidate(&Candidate::new("192.168.100.0/22", RuleKind::Cidr), &rules, None),
            Err(WhitelistError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_redundant() {
        let (rules, _, _) = seeded();
        assert_eq!(
            validate_candidate(&Candidate::new("203.119.24.100", RuleKind::Single), &rules, None)
                .unwrap_err(),
            WhitelistError::Redundancy(RedundancyError::ContainedBy {
                value: "203.119.24.100".to_string(),
                container: "203.119.24.0/24".to_string()
            })
        );
    }

    #[test]
    fn test_add_rule() {
        let (rules, office, _) = seeded();
        assert_eq!(rules.len(), 2);
        let rule = rules.get(&office).unwrap();
        assert_eq!(rule.value, "203.119.24.0/24");
        assert_eq!(rule.description, "office");
        assert_eq!(rule.created_by, "admin");
    }

    #[test]
    fn test_add_rule_refused_leaves_set_unchanged() {
        let (mut rules, _, _) = seeded();
        let before = rules.clone();
        assert!(add_rule(
            &mut rules,
            Candidate::new("116.228.89.156", RuleKind::Single),
            "",
            "admin"
        )
        .is_err());
        assert_eq!(rules, before);
    }

    #[test]
    fn test_edit_rule_against_itself() {
        let (mut rules, _, vpn) = seeded();
        let created_at = rules.get(&vpn).unwrap().created_at;
        let edited = edit_rule(
            &mut rules,
            &vpn,
            Candidate::new("116.228.89.156", RuleKind::Single),
            Some("vpn gateway (primary)"),
        )
        .unwrap();
        assert_eq!(edited.id, vpn);
        assert_eq!(edited.description, "vpn gateway (primary)");
        assert_eq!(edited.created_at, created_at);
        assert_eq!(edited.created_by, "admin");
    }

    #[test]
    fn test_edit_rule_change_kind() {
        let (mut rules, _, vpn) = seeded();
        let edited = edit_rule(
            &mut rules,
            &vpn,
            Candidate::new("116.228.89.0/24", RuleKind::Cidr),
            None,
        )
        .unwrap();
        assert_eq!(edited.kind, RuleKind::Cidr);
        assert_eq!(edited.description, "vpn gateway");
        assert_eq!(rules.get(&vpn).unwrap().value, "116.228.89.0/24");
    }

    #[test]
    fn test_edit_rule_into_other_rule() {
        let (mut rules, _, vpn) = seeded();
        assert!(matches!(
            edit_rule(
                &mut rules,
                &vpn,
                Candidate::new("203.119.24.9", RuleKind::Single),
                None
            ),
            Err(WhitelistError::Redundancy(RedundancyError::ContainedBy { .. }))
        ));
        assert_eq!(rules.get(&vpn).unwrap().value, "116.228.89.156");
    }

    #[test]
    fn test_edit_unknown_rule() {
        let (mut rules, _, _) = seeded();
        let missing = RuleId::from("missing");
        assert_eq!(
            edit_rule(
                &mut rules,
                &missing,
                Candidate::new("8.8.8.8", RuleKind::Single),
                None
            )
            .unwrap_err(),
            WhitelistError::RuleSet(RuleSetError::UnknownId(missing))
        );
    }

    #[test]
    fn test_delete_rule() {
        let (mut rules, office, _) = seeded();
        let deleted = delete_rule(&mut rules, &office).unwrap();
        assert_eq!(deleted.value, "203.119.24.0/24");
        assert_eq!(rules.len(), 1);
        // the address is no longer covered
        assert!(validate_candidate(
            &Candidate::new("203.119.24.100", RuleKind::Single),
            &rules,
            None
        )
        .is_ok());
        assert!(delete_rule(&mut rules, &office).is_err());
    }
}
