//! JSON rule file.
//!
//! The file holds `{ "rules": [...] }` in rule set order.

use crate::models::RuleSet;
use std::error::Error;
use std::io::ErrorKind;

/// Read the rule set from `rules_file`.
///
/// # Arguments
/// * `rules_file` - Path to a specific rule file. If None, uses the default
///   file and starts from an empty rule set when it does not exist yet.
///
/// # Returns
/// * `Ok(RuleSet)` - The rules from the file
/// * `Err` - If an explicit file doesn't exist, any file can't be read, or
///   the JSON is invalid
pub fn read_rule_file(rules_file: Option<&str>) -> Result<RuleSet, Box<dyn Error>> {
    match rules_file {
        Some(file) => {
            log::info!("Using provided rule file: {file}");
            load_rule_file(file, false)
        }
        None => load_rule_file(crate::config::DEFAULT_RULES_FILE, true),
    }
}

/// Read the rule set a mutating command will write back to `rules_file`.
///
/// A file that does not exist yet starts an empty rule set, explicit path or
/// not. Every other read failure is an error, so a file that exists is never
/// replaced by an empty set.
pub fn read_rule_file_for_update(rules_file: &str) -> Result<RuleSet, Box<dyn Error>> {
    load_rule_file(rules_file, true)
}

fn load_rule_file(rules_file: &str, missing_ok: bool) -> Result<RuleSet, Box<dyn Error>> {
    let rules = match std::fs::read_to_string(rules_file) {
        Ok(json) => {
            log::info!("Reading rules from file: {rules_file}");
            parse_rule_json(&json).map_err(|e| format!("Error parsing {rules_file}: {e}"))?
        }
        Err(e) if e.kind() == ErrorKind::NotFound && missing_ok => {
            log::warn!("Rule file not found: {rules_file}, starting with empty whitelist");
            RuleSet::new()
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(format!("Rule file does not exist: {rules_file}").into());
        }
        Err(e) => return Err(format!("Error reading rule file {rules_file}: {e}").into()),
    };
    log::debug!("Loaded {} rules", rules.len());

    Ok(rules)
}

/// Parse rule file contents; errors name the JSON path of the bad field.
pub fn parse_rule_json(json: &str) -> Result<RuleSet, Box<dyn Error>> {
    let de = &mut serde_json::Deserializer::from_str(json);
    let rules = serde_path_to_error::deserialize(de)
        .map_err(|e| format!("at '{}': {}", e.path(), e.inner()))?;
    Ok(rules)
}

/// Write the rule set to `rules_file`, replacing its contents.
pub fn write_rule_file(rules_file: &str, rules: &RuleSet) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(rules)
        .map_err(|e| format!("Error serializing rules: {e}"))?;
    log::warn!("Writing {} rules to file: {rules_file}", rules.len());
    std::fs::write(rules_file, json)
        .map_err(|e| format!("Error writing rule file {rules_file}: {e}"))?;
    Ok(())
}
