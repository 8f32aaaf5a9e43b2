//! Runtime settings, read from the environment (and `.env` via dotenv).

use chrono_tz::Tz;
use std::error::Error;

/// Rule file used when none is given.
pub const DEFAULT_RULES_FILE: &str = "whitelist_rules.json";
/// Recorded as `created_by` when no operator is given.
pub const DEFAULT_OPERATOR: &str = "admin";
pub const ENV_RULES_FILE: &str = "WHITELIST_RULES_FILE";
pub const ENV_OPERATOR: &str = "WHITELIST_OPERATOR";
pub const ENV_DISPLAY_TZ: &str = "WHITELIST_DISPLAY_TZ";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Explicitly configured rule file, `None` means [`DEFAULT_RULES_FILE`].
    pub rules_file: Option<String>,
    pub operator: String,
    /// Zone used to print `created_at`.
    pub display_tz: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rules_file: None,
            operator: DEFAULT_OPERATOR.to_string(),
            display_tz: Tz::UTC,
        }
    }
}

impl Config {
    /// Build from `WHITELIST_*` environment variables.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        config.rules_file = get(ENV_RULES_FILE);
        if let Some(operator) = get(ENV_OPERATOR) {
            config.operator = operator.trim().to_string();
        }
        if let Some(tz) = get(ENV_DISPLAY_TZ) {
            config.display_tz = tz
                .trim()
                .parse::<Tz>()
                .map_err(|e| format!("Invalid {ENV_DISPLAY_TZ} '{tz}': {e}"))?;
        }
        log::debug!("Config: {config:?}");
        Ok(config)
    }

    /// The rule file to read and write.
    pub fn rules_file(&self) -> &str {
        self.rules_file.as_deref().unwrap_or(DEFAULT_RULES_FILE)
    }
}
