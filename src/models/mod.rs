//! Domain models for the IP whitelist.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`CidrBlock`] - IPv4 block with CIDR notation support
//! - [`WhitelistRule`] - one whitelist entry, single address or CIDR
//! - [`RuleSet`] - ordered collection of rules, unique by id

mod ipv4;
mod rule;
mod rule_set;

// Re-export public types
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, parse_cidr, parse_ip_address, CidrBlock, MAX_LENGTH,
};
pub use rule::{parse_rule_value, Candidate, RuleId, RuleKind, RuleTarget, WhitelistRule};
pub use rule_set::RuleSet;
