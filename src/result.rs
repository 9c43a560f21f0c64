//! The result of publishing one build: parsed warnings compared with a reference build.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::build::Build;
use crate::config::ThresholdsConfig;
use crate::health::{StabilityVerdict, evaluate_stability};
use crate::history::select_reference;
use crate::model::{DuplicateCode, ParserResult, PriorityCounts};

/// Duplicate code found in one build.
///
/// Created once per build and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DryResult {
    build_number: u64,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_encoding: Option<String>,
    project: ParserResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference_build: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference_counts: Option<PriorityCounts>,
    #[serde(default)]
    new_warnings: Vec<DuplicateCode>,
    #[serde(default)]
    fixed_warnings: Vec<DuplicateCode>,
    use_previous_build_as_reference: bool,
    use_only_stable_builds_as_reference: bool,
}

impl DryResult {
    /// Create the result of `build`, comparing `project` with the reference
    /// build chosen from the build history.
    #[must_use]
    pub fn new(
        build: &Build,
        default_encoding: Option<&str>,
        project: ParserResult,
        use_previous_build_as_reference: bool,
        use_only_stable_builds_as_reference: bool,
    ) -> Self {
        let reference = select_reference(
            build.history(),
            use_previous_build_as_reference,
            use_only_stable_builds_as_reference,
        )
        .and_then(|record| record.annotations.as_deref().map(|a| (record.number, a)));

        let (new_warnings, fixed_warnings, reference_build, reference_counts): (
            Vec<DuplicateCode>,
            Vec<DuplicateCode>,
            _,
            _,
        ) = match reference {
            Some((number, previous)) => {
                let new_warnings = unmatched(project.annotations(), previous.iter());
                let fixed_warnings = unmatched(previous.iter(), project.annotations());
                (
                    new_warnings,
                    fixed_warnings,
                    Some(number),
                    Some(PriorityCounts::from_annotations(previous)),
                )
            }
            None => (project.annotations().cloned().collect(), Vec::new(), None, None),
        };

        Self {
            build_number: build.number(),
            timestamp: build.timestamp(),
            default_encoding: default_encoding.map(str::to_string),
            project,
            reference_build,
            reference_counts,
            new_warnings,
            fixed_warnings,
            use_previous_build_as_reference,
            use_only_stable_builds_as_reference,
        }
    }

    #[must_use]
    pub const fn build_number(&self) -> u64 {
        self.build_number
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn default_encoding(&self) -> Option<&str> {
        self.default_encoding.as_deref()
    }

    #[must_use]
    pub const fn project(&self) -> &ParserResult {
        &self.project
    }

    #[must_use]
    pub const fn reference_build(&self) -> Option<u64> {
        self.reference_build
    }

    #[must_use]
    pub const fn reference_counts(&self) -> Option<&PriorityCounts> {
        self.reference_counts.as_ref()
    }

    #[must_use]
    pub fn new_warnings(&self) -> &[DuplicateCode] {
        &self.new_warnings
    }

    #[must_use]
    pub fn fixed_warnings(&self) -> &[DuplicateCode] {
        &self.fixed_warnings
    }

    #[must_use]
    pub const fn use_previous_build_as_reference(&self) -> bool {
        self.use_previous_build_as_reference
    }

    #[must_use]
    pub const fn use_only_stable_builds_as_reference(&self) -> bool {
        self.use_only_stable_builds_as_reference
    }

    #[must_use]
    pub fn counts(&self) -> PriorityCounts {
        self.project.counts()
    }

    #[must_use]
    pub fn new_counts(&self) -> PriorityCounts {
        PriorityCounts::from_annotations(&self.new_warnings)
    }

    #[must_use]
    pub fn number_of_warnings(&self) -> usize {
        self.project.number_of_annotations()
    }

    #[must_use]
    pub fn stability(&self, thresholds: &ThresholdsConfig) -> StabilityVerdict {
        evaluate_stability(
            thresholds,
            &self.counts(),
            &self.new_counts(),
            self.reference_counts.as_ref(),
        )
    }
}

/// Warnings of `current` left over after matching each one against a
/// warning of `other` with the same tracking key, one to one.
fn unmatched<'a>(
    current: impl Iterator<Item = &'a DuplicateCode>,
    other: impl Iterator<Item = &'a DuplicateCode>,
) -> Vec<DuplicateCode> {
    let mut available: HashMap<String, usize> = HashMap::new();
    for warning in other {
        *available.entry(warning.tracking_key()).or_default() += 1;
    }
    current
        .filter(|warning| match available.get_mut(&warning.tracking_key()) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
