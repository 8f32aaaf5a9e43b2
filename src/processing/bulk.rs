//! Splitting pasted lists of addresses into individual candidates.

use crate::models::Candidate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[\s,;]+").expect("Invalid Regex?");
}

/// Split text pasted into a form on commas, semicolons and whitespace.
///
/// Empty entries are dropped, order is kept.
pub fn split_rule_list(input: &str) -> Vec<&str> {
    SEPARATORS
        .split(input)
        .filter(|s| !s.is_empty())
        .collect()
}

/// One [`Candidate`] per entry, kind detected from the value shape.
pub fn candidates_from_list(input: &str) -> Vec<Candidate> {
    split_rule_list(input)
        .into_iter()
        .map(Candidate::detect)
        .collect()
}
