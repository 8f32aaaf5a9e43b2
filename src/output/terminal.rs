//! Terminal output utilities.
//!
//! Provides formatting helpers and coloured rendering of rule lists and
//! candidate verdicts.

use super::csv::{RulePrintRow, STATUS_CONTAINED};
use crate::error::WhitelistError;
use crate::models::Candidate;
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// One line per rule; contained rules are dimmed and name their container.
pub fn format_rule_line(row: &RulePrintRow) -> String {
    let head = format!("{:>3} {:<18} {:<6}", row.j, row.value, row.kind);
    let line = if row.status == STATUS_CONTAINED {
        format!(
            "{} {}",
            head.dimmed(),
            format!("contained by {}", row.contained_by).yellow()
        )
    } else {
        format!("{} {}", head, row.status.green())
    };
    if row.description.is_empty() {
        line
    } else {
        format!("{line}  # {}", row.description)
    }
}

/// Verdict line for one candidate: accepted, or the reason it was refused.
pub fn format_verdict(candidate: &Candidate, result: &Result<(), WhitelistError>) -> String {
    let label = match result {
        Ok(()) => "OK".on_green(),
        Err(WhitelistError::Parse(_)) => "INVALID".on_red(),
        Err(WhitelistError::Validation(_)) => "REJECTED".on_red(),
        Err(WhitelistError::Redundancy(_)) => "REDUNDANT".on_yellow(),
        Err(WhitelistError::RuleSet(_)) => "ERROR".on_red(),
    };
    match result {
        Ok(()) => format!("{label} {} ({})", candidate.value, candidate.kind),
        Err(e) => format!("{label} {} ({}): {e}", candidate.value, candidate.kind),
    }
}

/// Summary line for a batch of checks.
pub fn format_check_summary(results: &[(Candidate, Result<(), WhitelistError>)]) -> String {
    let (accepted, refused): (Vec<_>, Vec<_>) = results.iter().partition(|(_, r)| r.is_ok());
    if refused.is_empty() {
        format!("{} accepted, 0 refused", accepted.len())
    } else {
        format!(
            "{} accepted, {} refused: {}",
            accepted.len(),
            refused.len(),
            refused.iter().map(|(c, _)| &c.value).join(", ")
        )
    }
}
