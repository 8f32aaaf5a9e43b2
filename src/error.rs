//! Error types for whitelist rule handling.
//!
//! Every error here is recoverable: callers surface it next to the
//! offending input and refuse the submission.

use crate::models::{RuleId, RuleKind};
use thiserror::Error;

/// Malformed address or CIDR text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The address did not split into four dot-separated segments.
    #[error("invalid IPv4 address '{0}': expected 4 dot-separated octets")]
    SegmentCount(String),

    /// A segment was empty or not a base-10 integer.
    #[error("invalid octet '{octet}' in address '{addr}'")]
    InvalidOctet { addr: String, octet: String },

    /// A segment parsed but is larger than 255.
    #[error("octet '{octet}' out of range 0-255 in address '{addr}'")]
    OctetOutOfRange { addr: String, octet: String },

    /// CIDR text without a `/prefix` part.
    #[error("missing '/prefix' in CIDR '{0}'")]
    MissingPrefix(String),

    /// Prefix part is not a base-10 integer.
    #[error("invalid prefix length '{prefix}' in CIDR '{cidr}'")]
    InvalidPrefix { cidr: String, prefix: String },

    /// Prefix part is larger than 32.
    #[error("prefix length {prefix} out of range 0-32 in CIDR '{cidr}'")]
    PrefixOutOfRange { cidr: String, prefix: u32 },

    /// Declared kind disagrees with the shape of the value.
    #[error("value '{value}' does not match rule kind {kind}")]
    KindMismatch { value: String, kind: RuleKind },
}

/// Rule rejected by policy: only public addresses may be whitelisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is a private (RFC1918) address")]
    PrivateAddress(String),

    #[error("{0} overlaps a private (RFC1918) range")]
    PrivateRangeOverlap(String),
}

/// Rule rejected because the rule set already covers it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedundancyError {
    #[error("{value} is already covered by rule {container}")]
    ContainedBy { value: String, container: String },

    #[error("{value} duplicates existing rule {existing}")]
    DuplicateOf { value: String, existing: String },
}

/// Structural problems with the rule set itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    #[error("rule id {0} already exists")]
    DuplicateId(RuleId),

    #[error("no rule with id {0}")]
    UnknownId(RuleId),

    /// Stored value with leading or trailing whitespace.
    #[error("rule {id} has surrounding whitespace in value '{value}'")]
    UntrimmedValue { id: RuleId, value: String },
}

/// Any reason a candidate rule or a rule set mutation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WhitelistError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Redundancy(#[from] RedundancyError),

    #[error(transparent)]
    RuleSet(#[from] RuleSetError),
}

/// Result type for rule set operations.
pub type WhitelistResult<T> = Result<T, WhitelistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = ParseError::OctetOutOfRange {
            addr: "1.2.3.256".to_string(),
            octet: "256".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "octet '256' out of range 0-255 in address '1.2.3.256'"
        );
    }

    #[test]
    fn test_whitelist_error_is_transparent() {
        let err: WhitelistError = ValidationError::PrivateAddress("10.0.0.1".to_string()).into();
        assert_eq!(err.to_string(), "10.0.0.1 is a private (RFC1918) address");
        assert!(matches!(err, WhitelistError::Validation(_)));
    }
}
