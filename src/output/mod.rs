//! Output formatting for whitelist rules.
//!
//! This module handles formatting and outputting rule data:
//! - [`csv`] - CSV output formatting
//! - [`terminal`] - Terminal output with colors

mod csv;
mod terminal;

pub use csv::{
    build_rule_rows, csv_header, format_csv_row, rule_print, RulePrintRow, STATUS_ACTIVE,
    STATUS_CONTAINED,
};
pub use terminal::{format_check_summary, format_field, format_rule_line, format_verdict};
