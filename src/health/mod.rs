//! Health score and build stability, computed from warning counts.
//!
//! Both evaluations are free functions over counts and thresholds so they can
//! be reused by the publisher, the matrix aggregator and the report output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{HealthConfig, PriorityThresholds, ThresholdsConfig};
use crate::model::{Priority, PriorityCounts};

/// Outcome of a build, ordered by severity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    #[default]
    Success,
    Unstable,
    Failure,
}

impl BuildStatus {
    /// The more severe of two statuses.
    #[must_use]
    pub fn worse(self, other: Self) -> Self {
        self.max(other)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Unstable => "UNSTABLE",
            Self::Failure => "FAILURE",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds of the health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDescriptor {
    pub healthy: Option<u32>,
    pub unhealthy: Option<u32>,
    pub minimum_priority: Priority,
}

impl HealthDescriptor {
    #[must_use]
    pub const fn from_config(config: &HealthConfig) -> Self {
        Self {
            healthy: config.healthy,
            unhealthy: config.unhealthy,
            minimum_priority: config.threshold_limit,
        }
    }

    /// A health report is produced only with both bounds set and `healthy < unhealthy`.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!((self.healthy, self.unhealthy), (Some(h), Some(u)) if h < u)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// 0 (unhealthy) to 100 (healthy).
    pub score: u32,
    /// Warnings that counted towards the score.
    pub count: usize,
    pub description: String,
}

/// Health score for the given counts, or `None` if health reporting is disabled.
#[must_use]
pub fn evaluate_health(descriptor: &HealthDescriptor, counts: &PriorityCounts) -> Option<HealthReport> {
    let (Some(healthy), Some(unhealthy)) = (descriptor.healthy, descriptor.unhealthy) else {
        return None;
    };
    if healthy >= unhealthy {
        return None;
    }

    let count = counts.at_least(descriptor.minimum_priority);
    let counted = u64::try_from(count).unwrap_or(u64::MAX);
    let (healthy, unhealthy) = (u64::from(healthy), u64::from(unhealthy));
    let score = if counted < healthy {
        100
    } else if counted > unhealthy {
        0
    } else {
        100 - (counted - healthy) * 100 / (unhealthy - healthy)
    };

    Some(HealthReport {
        score: u32::try_from(score).unwrap_or(0),
        count,
        description: describe_count(count),
    })
}

fn describe_count(count: usize) -> String {
    match count {
        0 => "No duplicate code found.".to_string(),
        1 => "One duplicate code block found.".to_string(),
        n => format!("{n} duplicate code blocks found."),
    }
}

/// Stability verdict with the reasons that led to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityVerdict {
    pub status: BuildStatus,
    pub reasons: Vec<String>,
}

/// Evaluate build stability.
///
/// `total` are the counts of the current build, `new` the counts of warnings
/// not present in the reference build, `reference` the counts of the
/// reference build if there is one. With `use_delta_values` the new counts
/// are replaced by `max(0, total - reference)` per priority.
#[must_use]
pub fn evaluate_stability(
    thresholds: &ThresholdsConfig,
    total: &PriorityCounts,
    new: &PriorityCounts,
    reference: Option<&PriorityCounts>,
) -> StabilityVerdict {
    let new = if thresholds.use_delta_values {
        delta(total, reference)
    } else {
        *new
    };

    let mut verdict = StabilityVerdict::default();
    check_level(&mut verdict, BuildStatus::Failure, "total", &thresholds.failed_total, total);
    if thresholds.can_compute_new {
        check_level(&mut verdict, BuildStatus::Failure, "new", &thresholds.failed_new, &new);
    }
    check_level(&mut verdict, BuildStatus::Unstable, "total", &thresholds.unstable_total, total);
    if thresholds.can_compute_new {
        check_level(&mut verdict, BuildStatus::Unstable, "new", &thresholds.unstable_new, &new);
    }
    verdict
}

fn delta(total: &PriorityCounts, reference: Option<&PriorityCounts>) -> PriorityCounts {
    let reference = reference.copied().unwrap_or_default();
    PriorityCounts {
        high: total.high.saturating_sub(reference.high),
        normal: total.normal.saturating_sub(reference.normal),
        low: total.low.saturating_sub(reference.low),
    }
}

fn check_level(
    verdict: &mut StabilityVerdict,
    level: BuildStatus,
    kind: &str,
    limits: &PriorityThresholds,
    counts: &PriorityCounts,
) {
    let scopes = [None, Some(Priority::High), Some(Priority::Normal), Some(Priority::Low)];
    for scope in scopes {
        let Some(limit) = limits.get(scope) else {
            continue;
        };
        let count = counts.get(scope);
        if count > usize::try_from(limit).unwrap_or(usize::MAX) {
            let priority = scope.map_or_else(String::new, |p| format!("{p} priority "));
            let level_name = if level == BuildStatus::Failure { "failed" } else { "unstable" };
            verdict.reasons.push(format!(
                "{count} {kind} {priority}warnings exceed the {level_name} threshold of {limit}"
            ));
            verdict.status = verdict.status.worse(level);
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
