//! Configuration for a conversion run.
//!
//! The taxonomy year is always chosen by the caller. Nothing here is inferred
//! from the rows being converted.

use std::fmt;
use std::str::FromStr;

use crate::taxonomy::YearPolicy;

/// Environment variable holding the taxonomy year
pub const YEAR_ENV: &str = "ACTIVITY_LOG_YEAR";
/// Environment variable holding the year policy
pub const YEAR_POLICY_ENV: &str = "ACTIVITY_LOG_YEAR_POLICY";
/// Environment variable that switches malformed rows from skip to abort
pub const ABORT_ON_MALFORMED_ENV: &str = "ACTIVITY_LOG_ABORT_ON_MALFORMED";

/// What to do with a row whose date or layout is malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Log the row and continue with the next one
    #[default]
    Skip,
    /// Stop the run at the first malformed row
    Abort,
}

impl fmt::Display for MalformedRowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("skip"),
            Self::Abort => f.write_str("abort"),
        }
    }
}

/// Configuration for the converter
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    /// Year whose taxonomy is active for the run
    pub year: Option<i32>,
    /// How to pick a taxonomy when `year` has no table of its own
    pub year_policy: YearPolicy,
    /// Handling of malformed rows
    pub malformed_policy: MalformedRowPolicy,
}

impl ConverterConfig {
    /// Create a new configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the `ACTIVITY_LOG_*` environment variables
    ///
    /// Values that fail to parse are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(year) = lookup(YEAR_ENV) {
            match year.trim().parse::<i32>() {
                Ok(year) => config.year = Some(year),
                Err(e) => log::warn!("Ignoring {YEAR_ENV}={year}: {e}"),
            }
        }

        if let Some(policy) = lookup(YEAR_POLICY_ENV) {
            match YearPolicy::from_str(&policy) {
                Ok(policy) => config.year_policy = policy,
                Err(e) => log::warn!("Ignoring {YEAR_POLICY_ENV}: {e}"),
            }
        }

        if let Some(flag) = lookup(ABORT_ON_MALFORMED_ENV) {
            match parse_flag(&flag) {
                Some(true) => config.malformed_policy = MalformedRowPolicy::Abort,
                Some(false) => config.malformed_policy = MalformedRowPolicy::Skip,
                None => log::warn!("Ignoring {ABORT_ON_MALFORMED_ENV}={flag}: not a boolean"),
            }
        }

        config
    }

    /// Set the taxonomy year
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the year policy
    #[must_use]
    pub fn with_year_policy(mut self, policy: YearPolicy) -> Self {
        self.year_policy = policy;
        self
    }

    /// Set the malformed row policy
    #[must_use]
    pub fn with_malformed_policy(mut self, policy: MalformedRowPolicy) -> Self {
        self.malformed_policy = policy;
        self
    }

    /// Abort on the first malformed row
    #[must_use]
    pub fn abort_on_malformed(self) -> Self {
        self.with_malformed_policy(MalformedRowPolicy::Abort)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::default();
        assert_eq!(config.year, None);
        assert_eq!(config.year_policy, YearPolicy::CarryForward);
        assert_eq!(config.malformed_policy, MalformedRowPolicy::Skip);
    }

    #[test]
    fn test_builder_methods() {
        let config = ConverterConfig::new()
            .with_year(2024)
            .with_year_policy(YearPolicy::Exact)
            .abort_on_malformed();
        assert_eq!(config.year, Some(2024));
        assert_eq!(config.year_policy, YearPolicy::Exact);
        assert_eq!(config.malformed_policy, MalformedRowPolicy::Abort);
    }

    #[test]
    fn test_from_lookup() {
        let config = ConverterConfig::from_lookup(lookup(&[
            (YEAR_ENV, "2022"),
            (YEAR_POLICY_ENV, "nearest"),
            (ABORT_ON_MALFORMED_ENV, "true"),
        ]));
        assert_eq!(config.year, Some(2022));
        assert_eq!(config.year_policy, YearPolicy::Nearest);
        assert_eq!(config.malformed_policy, MalformedRowPolicy::Abort);
    }

    #[test]
    fn test_from_lookup_ignores_bad_values() {
        let config = ConverterConfig::from_lookup(lookup(&[
            (YEAR_ENV, "twenty"),
            (YEAR_POLICY_ENV, "latest"),
            (ABORT_ON_MALFORMED_ENV, "maybe"),
        ]));
        assert_eq!(config.year, None);
        assert_eq!(config.year_policy, YearPolicy::CarryForward);
        assert_eq!(config.malformed_policy, MalformedRowPolicy::Skip);
    }
}
