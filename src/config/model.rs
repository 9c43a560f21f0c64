use serde::{Deserialize, Serialize};

use crate::model::Priority;

/// Supported config version. Current version is "2".
pub const CONFIG_VERSION: &str = "2";

/// Legacy flat config version, migrated on load.
pub const CONFIG_VERSION_V1: &str = "1";

/// Pattern used when none (or a blank one) is configured.
pub const DEFAULT_PATTERN: &str = "**/cpd.xml";

/// Default minimum number of duplicated lines for a high priority warning.
pub const DEFAULT_HIGH_THRESHOLD: i32 = 50;

/// Default minimum number of duplicated lines for a normal priority warning.
pub const DEFAULT_NORMAL_THRESHOLD: i32 = 25;

/// Publisher configuration (version 2).
///
/// The raw duplication thresholds are stored as configured. Read them through
/// [`ThresholdValidation`](super::ThresholdValidation) to get a consistent pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Ant-style file set pattern of report files. Blank means [`DEFAULT_PATTERN`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Minimum number of duplicated lines for high priority warnings.
    #[serde(default = "default_high_threshold")]
    pub high_threshold: i32,

    /// Minimum number of duplicated lines for normal priority warnings.
    #[serde(default = "default_normal_threshold")]
    pub normal_threshold: i32,

    /// Encoding used to read report files. Unset means UTF-8.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_encoding: Option<String>,

    /// Derive module names from Maven POM or Ant build files.
    #[serde(default)]
    pub detect_modules: bool,

    /// Publish results for builds that already failed.
    #[serde(default)]
    pub can_run_on_failed: bool,

    #[serde(default)]
    pub health: HealthConfig,

    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    #[serde(default)]
    pub reference: ReferenceConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: Some(CONFIG_VERSION.to_string()),
            pattern: None,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            normal_threshold: DEFAULT_NORMAL_THRESHOLD,
            default_encoding: None,
            detect_modules: false,
            can_run_on_failed: false,
            health: HealthConfig::default(),
            thresholds: ThresholdsConfig::default(),
            reference: ReferenceConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl Config {
    /// Pattern to scan for, falling back to [`DEFAULT_PATTERN`] when unset or blank.
    #[must_use]
    pub fn effective_pattern(&self) -> &str {
        self.pattern
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_PATTERN)
    }
}

/// Health report bounds [health].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthConfig {
    /// Report 100% health when the number of warnings is less than this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<u32>,

    /// Report 0% health when the number of warnings is greater than this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unhealthy: Option<u32>,

    /// Lowest priority that counts towards health.
    #[serde(default = "default_threshold_limit")]
    pub threshold_limit: Priority,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            healthy: None,
            unhealthy: None,
            threshold_limit: default_threshold_limit(),
        }
    }
}

/// Warning-count limits per priority. `all` applies to the sum of all priorities.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriorityThresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<u32>,
}

impl PriorityThresholds {
    /// Limit for one priority, or for the total when `priority` is `None`.
    #[must_use]
    pub const fn get(&self, priority: Option<Priority>) -> Option<u32> {
        match priority {
            None => self.all,
            Some(Priority::High) => self.high,
            Some(Priority::Normal) => self.normal,
            Some(Priority::Low) => self.low,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.all.is_none() && self.high.is_none() && self.normal.is_none() && self.low.is_none()
    }
}

/// Build stability thresholds [thresholds].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(clippy::struct_field_names)]
pub struct ThresholdsConfig {
    /// Compare new warnings by count delta instead of set difference.
    #[serde(default)]
    pub use_delta_values: bool,

    /// Evaluate the `*_new` thresholds against the reference build.
    #[serde(default = "default_true")]
    pub can_compute_new: bool,

    #[serde(default, skip_serializing_if = "PriorityThresholds::is_empty")]
    pub unstable_total: PriorityThresholds,

    #[serde(default, skip_serializing_if = "PriorityThresholds::is_empty")]
    pub unstable_new: PriorityThresholds,

    #[serde(default, skip_serializing_if = "PriorityThresholds::is_empty")]
    pub failed_total: PriorityThresholds,

    #[serde(default, skip_serializing_if = "PriorityThresholds::is_empty")]
    pub failed_new: PriorityThresholds,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            use_delta_values: false,
            can_compute_new: true,
            unstable_total: PriorityThresholds::default(),
            unstable_new: PriorityThresholds::default(),
            failed_total: PriorityThresholds::default(),
            failed_new: PriorityThresholds::default(),
        }
    }
}

/// Reference build selection [reference].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceConfig {
    /// Always compare against the immediately preceding build.
    #[serde(default)]
    pub use_previous_build: bool,

    /// Only successful builds qualify as reference.
    #[serde(default)]
    pub use_stable_builds_only: bool,
}

/// Persisted build history [history].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_max_entries(),
        }
    }
}

const fn default_high_threshold() -> i32 {
    DEFAULT_HIGH_THRESHOLD
}

const fn default_normal_threshold() -> i32 {
    DEFAULT_NORMAL_THRESHOLD
}

const fn default_threshold_limit() -> Priority {
    Priority::Low
}

const fn default_true() -> bool {
    true
}

const fn default_max_entries() -> usize {
    20
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
