//! CSV output for the rule list.

use crate::models::{RuleId, RuleSet};
use crate::processing::compute_containment_annotations;
use chrono_tz::Tz;
use std::collections::BTreeMap;

use super::terminal::format_field;

/// Status shown for rules covered by another rule.
pub const STATUS_CONTAINED: &str = "contained";
/// Status shown for rules not covered by another rule.
pub const STATUS_ACTIVE: &str = "active";

/// Represents a row of rule data for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePrintRow {
    /// Position in the rule set, starting at 1.
    pub j: usize,
    pub id: String,
    pub kind: String,
    pub value: String,
    /// [`STATUS_CONTAINED`] or [`STATUS_ACTIVE`].
    pub status: String,
    /// Value of the containing rule, empty if none.
    pub contained_by: String,
    pub description: String,
    /// Creation time rendered in the display zone.
    pub created_at: String,
    pub created_by: String,
}

/// One row per rule, in rule set order, with containment status.
pub fn build_rule_rows(
    rules: &RuleSet,
    annotations: &BTreeMap<RuleId, String>,
    display_tz: Tz,
) -> Vec<RulePrintRow> {
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            let contained_by = annotations.get(&rule.id).cloned();
            RulePrintRow {
                j: i + 1,
                id: rule.id.to_string(),
                kind: rule.kind.to_string(),
                value: rule.value.clone(),
                status: if contained_by.is_some() {
                    STATUS_CONTAINED
                } else {
                    STATUS_ACTIVE
                }
                .to_string(),
                contained_by: contained_by.unwrap_or_default(),
                description: rule.description.clone(),
                created_at: rule
                    .created_at
                    .with_timezone(&display_tz)
                    .format("%Y-%m-%d %H:%M:%S %Z")
                    .to_string(),
                created_by: rule.created_by.clone(),
            }
        })
        .collect()
}

/// CSV header line.
pub fn csv_header() -> String {
    r#""cnt","id","kind","value","status","contained_by","description","created_at","created_by""#
        .to_string()
}

/// Format a single CSV row.
pub fn format_csv_row(row: &RulePrintRow) -> String {
    format!(
        r#"{j},{id},{kind},{value},{status},{contained_by},{description},{created_at},{created_by}"#,
        j = format_field(row.j, 5),
        id = format_field(&row.id, 10),
        kind = format_field(&row.kind, 8),
        value = format_field(&row.value, 20),
        status = format_field(&row.status, 11),
        contained_by = format_field(&row.contained_by, 20),
        description = format_field(row.description.replace('"', "\"\""), 24),
        created_at = format_field(&row.created_at, 25),
        created_by = format_field(&row.created_by, 12),
    )
}

/// Print the rule list as CSV to stdout.
pub fn rule_print(rules: &RuleSet, display_tz: Tz) {
    log::info!("#Start rule_print() rule count = {}", rules.len());
    let annotations = compute_containment_annotations(rules);

    println!("{}", csv_header());
    for row in build_rule_rows(rules, &annotations, display_tz) {
        println!("{}", format_csv_row(&row));
    }
}
