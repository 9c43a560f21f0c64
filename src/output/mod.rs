mod json;
mod text;

pub use json::{JsonFormatter, JsonReport, JsonSummary};
pub use text::{ColorMode, TextFormatter};

use crate::error::Result;
use crate::health::{HealthReport, StabilityVerdict};
use crate::result::DryResult;

/// Everything a formatter renders for one published result.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub result: &'a DryResult,
    pub health: Option<&'a HealthReport>,
    pub stability: &'a StabilityVerdict,
}

impl<'a> Report<'a> {
    #[must_use]
    pub const fn new(
        result: &'a DryResult,
        health: Option<&'a HealthReport>,
        stability: &'a StabilityVerdict,
    ) -> Self {
        Self {
            result,
            health,
            stability,
        }
    }
}

/// Trait for formatting a result into various output formats.
pub trait OutputFormatter {
    /// Format the report into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, report: &Report<'_>) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
