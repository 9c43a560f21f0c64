//! Version 1 configuration: one flat record with every option as a string.
//!
//! Old records are still accepted by the loader and converted once with
//! [`LegacyConfig::migrate`]. Nothing else in the crate reads this type.

use serde::{Deserialize, Serialize};

use crate::model::Priority;

use super::model::{
    CONFIG_VERSION, Config, HealthConfig, HistoryConfig, PriorityThresholds, ReferenceConfig,
    ThresholdsConfig,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct LegacyConfig {
    pub version: Option<String>,
    pub healthy: String,
    pub unhealthy: String,
    pub threshold_limit: String,
    pub default_encoding: String,
    pub use_delta_values: bool,
    pub unstable_total_all: String,
    pub unstable_total_high: String,
    pub unstable_total_normal: String,
    pub unstable_total_low: String,
    pub unstable_new_all: String,
    pub unstable_new_high: String,
    pub unstable_new_normal: String,
    pub unstable_new_low: String,
    pub failed_total_all: String,
    pub failed_total_high: String,
    pub failed_total_normal: String,
    pub failed_total_low: String,
    pub failed_new_all: String,
    pub failed_new_high: String,
    pub failed_new_normal: String,
    pub failed_new_low: String,
    pub can_run_on_failed: bool,
    pub use_previous_build_as_reference: bool,
    pub use_stable_build_as_reference: bool,
    pub should_detect_modules: bool,
    pub can_compute_new: bool,
    pub pattern: String,
    pub high_threshold: i32,
    pub normal_threshold: i32,
}

/// A migrated configuration together with the values that had to be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub config: Config,
    pub warnings: Vec<String>,
}

impl LegacyConfig {
    /// Convert the flat record into a version 2 [`Config`].
    ///
    /// Blank values become unset. Values that do not parse are dropped and
    /// reported in [`Migration::warnings`].
    #[must_use]
    pub fn migrate(self) -> Migration {
        let mut warnings = Vec::new();

        let health = HealthConfig {
            healthy: parse_count("healthy", &self.healthy, &mut warnings),
            unhealthy: parse_count("unhealthy", &self.unhealthy, &mut warnings),
            threshold_limit: parse_priority(&self.threshold_limit, &mut warnings),
        };

        let thresholds = ThresholdsConfig {
            use_delta_values: self.use_delta_values,
            can_compute_new: self.can_compute_new,
            unstable_total: priority_thresholds(
                "unstable_total",
                [
                    &self.unstable_total_all,
                    &self.unstable_total_high,
                    &self.unstable_total_normal,
                    &self.unstable_total_low,
                ],
                &mut warnings,
            ),
            unstable_new: priority_thresholds(
                "unstable_new",
                [
                    &self.unstable_new_all,
                    &self.unstable_new_high,
                    &self.unstable_new_normal,
                    &self.unstable_new_low,
                ],
                &mut warnings,
            ),
            failed_total: priority_thresholds(
                "failed_total",
                [
                    &self.failed_total_all,
                    &self.failed_total_high,
                    &self.failed_total_normal,
                    &self.failed_total_low,
                ],
                &mut warnings,
            ),
            failed_new: priority_thresholds(
                "failed_new",
                [
                    &self.failed_new_all,
                    &self.failed_new_high,
                    &self.failed_new_normal,
                    &self.failed_new_low,
                ],
                &mut warnings,
            ),
        };

        let config = Config {
            version: Some(CONFIG_VERSION.to_string()),
            pattern: non_blank(self.pattern),
            high_threshold: self.high_threshold,
            normal_threshold: self.normal_threshold,
            default_encoding: non_blank(self.default_encoding),
            detect_modules: self.should_detect_modules,
            can_run_on_failed: self.can_run_on_failed,
            health,
            thresholds,
            reference: ReferenceConfig {
                use_previous_build: self.use_previous_build_as_reference,
                use_stable_builds_only: self.use_stable_build_as_reference,
            },
            history: HistoryConfig::default(),
        };

        Migration { config, warnings }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.trim().to_string())
    }
}

fn parse_count(field: &str, value: &str, warnings: &mut Vec<String>) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse() {
        Ok(count) => Some(count),
        Err(_) => {
            warnings.push(format!("ignoring invalid value '{value}' for {field}"));
            None
        }
    }
}

fn parse_priority(value: &str, warnings: &mut Vec<String>) -> Priority {
    if value.trim().is_empty() {
        return Priority::Low;
    }
    value.parse().unwrap_or_else(|_| {
        warnings.push(format!(
            "ignoring invalid value '{}' for threshold_limit",
            value.trim()
        ));
        Priority::Low
    })
}

fn priority_thresholds(
    prefix: &str,
    [all, high, normal, low]: [&String; 4],
    warnings: &mut Vec<String>,
) -> PriorityThresholds {
    PriorityThresholds {
        all: parse_count(&format!("{prefix}_all"), all, warnings),
        high: parse_count(&format!("{prefix}_high"), high, warnings),
        normal: parse_count(&format!("{prefix}_normal"), normal, warnings),
        low: parse_count(&format!("{prefix}_low"), low, warnings),
    }
}

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;
