use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::health::{BuildStatus, HealthReport, StabilityVerdict};
use crate::result::DryResult;

use super::{OutputFormatter, Report};

pub struct JsonFormatter;

/// Machine readable report. Also read back by `aggregate` to combine matrix runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonReport {
    pub summary: JsonSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthReport>,
    pub stability: StabilityVerdict,
    pub result: DryResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSummary {
    pub build: u64,
    pub status: BuildStatus,
    pub files: usize,
    pub warnings: usize,
    pub high: usize,
    pub normal: usize,
    pub low: usize,
    pub new: usize,
    pub fixed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_build: Option<u64>,
}

impl JsonReport {
    #[must_use]
    pub fn from_report(report: &Report<'_>) -> Self {
        let result = report.result;
        let counts = result.counts();
        Self {
            summary: JsonSummary {
                build: result.build_number(),
                status: report.stability.status,
                files: result.project().number_of_files(),
                warnings: counts.total(),
                high: counts.high,
                normal: counts.normal,
                low: counts.low,
                new: result.new_warnings().len(),
                fixed: result.fixed_warnings().len(),
                reference_build: result.reference_build(),
            },
            health: report.health.cloned(),
            stability: report.stability.clone(),
            result: result.clone(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report<'_>) -> Result<String> {
        Ok(serde_json::to_string_pretty(&JsonReport::from_report(report))?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
