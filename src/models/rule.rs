//! Whitelist rule data model.

use super::ipv4::{parse_cidr, parse_ip_address, CidrBlock};
use crate::error::ParseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use uuid::Uuid;

/// Opaque rule identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Fresh, time-ordered identifier.
    pub fn generate() -> RuleId {
        RuleId(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        RuleId(id.to_string())
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        RuleId(id)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a rule names one address or a CIDR block.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Single,
    Cidr,
}

impl RuleKind {
    /// Kind implied by the shape of `value`: a `/` suffix means CIDR.
    pub fn detect(value: &str) -> RuleKind {
        if value.contains('/') {
            RuleKind::Cidr
        } else {
            RuleKind::Single
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Single => f.write_str("single"),
            RuleKind::Cidr => f.write_str("cidr"),
        }
    }
}

/// Parsed form of a rule value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    Address(Ipv4Addr),
    Block(CidrBlock),
}

/// Parse `value` according to `kind`, rejecting a value whose shape does
/// not match the declared kind.
pub fn parse_rule_value(value: &str, kind: RuleKind) -> Result<RuleTarget, ParseError> {
    if RuleKind::detect(value) != kind {
        return Err(ParseError::KindMismatch {
            value: value.to_string(),
            kind,
        });
    }
    match kind {
        RuleKind::Single => parse_ip_address(value).map(RuleTarget::Address),
        RuleKind::Cidr => parse_cidr(value).map(RuleTarget::Block),
    }
}

/// A value/kind pair typed into an add or edit form, not yet a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub kind: RuleKind,
}

impl Candidate {
    pub fn new(value: &str, kind: RuleKind) -> Candidate {
        Candidate {
            value: value.trim().to_string(),
            kind,
        }
    }

    /// Candidate whose kind is taken from the shape of the value.
    pub fn detect(value: &str) -> Candidate {
        let value = value.trim();
        Candidate::new(value, RuleKind::detect(value))
    }

    pub fn target(&self) -> Result<RuleTarget, ParseError> {
        parse_rule_value(&self.value, self.kind)
    }
}

/// One entry of the IP whitelist.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WhitelistRule {
    pub id: RuleId,
    /// Dotted quad, with a `/prefix` suffix for CIDR rules.
    pub value: String,
    pub kind: RuleKind,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl WhitelistRule {
    pub fn new(
        id: RuleId,
        candidate: Candidate,
        description: &str,
        created_at: DateTime<Utc>,
        created_by: &str,
    ) -> WhitelistRule {
        WhitelistRule {
            id,
            value: candidate.value,
            kind: candidate.kind,
            description: description.to_string(),
            created_at,
            created_by: created_by.to_string(),
        }
    }

    pub fn target(&self) -> Result<RuleTarget, ParseError> {
        parse_rule_value(&self.value, self.kind)
    }

    /// The block form of a CIDR rule, `None` for single rules or values
    /// that do not parse.
    pub fn cidr_block(&self) -> Option<CidrBlock> {
        match self.target() {
            Ok(RuleTarget::Block(block)) => Some(block),
            _ => None,
        }
    }
}
