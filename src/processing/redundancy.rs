//! Redundancy check for a candidate rule before it is submitted.
//!
//! Only these cases are detected:
//! - a single address inside an existing CIDR rule
//! - a single address equal to an existing single rule
//! - a CIDR string equal to an existing CIDR rule
//!
//! A new CIDR that lies inside, or covers, an existing CIDR is not flagged,
//! and neither is a new CIDR covering existing single rules. The list view
//! shows those through [`super::compute_containment_annotations`].

use super::containment::address_in_cidr;
use crate::error::{ParseError, RedundancyError};
use crate::models::{Candidate, RuleId, RuleKind, RuleSet, RuleTarget};
use std::fmt;

/// Outcome of [`check_redundancy`]. The strings are existing rule values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedundancyVerdict {
    None,
    ContainedBy(String),
    DuplicateOf(String),
}

impl RedundancyVerdict {
    pub fn is_redundant(&self) -> bool {
        !matches!(self, RedundancyVerdict::None)
    }

    /// Turn a redundant verdict into the error reported for `value`.
    pub fn into_result(self, value: &str) -> Result<(), RedundancyError> {
        match self {
            RedundancyVerdict::None => Ok(()),
            RedundancyVerdict::ContainedBy(container) => Err(RedundancyError::ContainedBy {
                value: value.to_string(),
                container,
            }),
            RedundancyVerdict::DuplicateOf(existing) => Err(RedundancyError::DuplicateOf {
                value: value.to_string(),
                existing,
            }),
        }
    }
}

impl fmt::Display for RedundancyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedundancyVerdict::None => write!(f, "not redundant"),
            RedundancyVerdict::ContainedBy(value) => write!(f, "contained by {value}"),
            RedundancyVerdict::DuplicateOf(value) => write!(f, "duplicate of {value}"),
        }
    }
}

/// Check `candidate` against `rules`, skipping the rule with `exclude_id`.
///
/// Rules are scanned in order and the first match wins. Fails only if the
/// candidate value does not parse as its declared kind.
pub fn check_redundancy(
    candidate: &Candidate,
    rules: &RuleSet,
    exclude_id: Option<&RuleId>,
) -> Result<RedundancyVerdict, ParseError> {
    let target = candidate.target()?;
    let others = rules.iter().filter(|r| Some(&r.id) != exclude_id);

    for existing in others {
        let verdict = match (target, existing.kind) {
            (RuleTarget::Address(ip), RuleKind::Cidr) => match existing.cidr_block() {
                Some(block) if address_in_cidr(ip, &block) => {
                    RedundancyVerdict::ContainedBy(existing.value.clone())
                }
                _ => RedundancyVerdict::None,
            },
            (RuleTarget::Address(_), RuleKind::Single) | (RuleTarget::Block(_), RuleKind::Cidr)
                if existing.value == candidate.value =>
            {
                RedundancyVerdict::DuplicateOf(existing.value.clone())
            }
            _ => RedundancyVerdict::None,
        };
        if verdict.is_redundant() {
            log::debug!(
                "candidate {} ({}) {verdict} [rule {}]",
                candidate.value,
                candidate.kind,
                existing.id
            );
            return Ok(verdict);
        }
    }
    Ok(RedundancyVerdict::None)
}
