//! Rule storage.
//!
//! - [`rule_file`] - reading and writing the JSON rule file

mod rule_file;

pub use rule_file::{parse_rule_json, read_rule_file, read_rule_file_for_update, write_rule_file};
