//! Whitelist rule processing logic.
//!
//! This module contains the rule engine proper:
//! - [`containment`] - address-in-block and block-in-block tests
//! - [`private`] - RFC1918 private range checks
//! - [`redundancy`] - pre-submission redundancy check
//! - [`annotations`] - "contained by" status for the list view
//! - [`validate`] - full candidate validation and rule set edits
//! - [`bulk`] - splitting pasted address lists

mod annotations;
mod bulk;
mod containment;
mod private;
mod redundancy;
mod validate;

// Re-export public functions
pub use annotations::compute_containment_annotations;
pub use bulk::{candidates_from_list, split_rule_list};
pub use containment::{address_in_cidr, cidr_contains_cidr};
pub use private::{cidr_overlaps_private_range, is_private_address, private_ranges, PRIVATE_RANGES};
pub use redundancy::{check_redundancy, RedundancyVerdict};
pub use validate::{add_rule, delete_rule, edit_rule, validate_candidate};
