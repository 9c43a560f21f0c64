use std::path::Path;

use serde::Deserialize;

use crate::error::{DryGuardError, Result};
use crate::model::CodeLocation;

use super::{DuplicationParser, DuplicationSet};

/// Simian similarity analyser reports (`<simian>`).
pub struct SimianParser;

#[derive(Debug, Deserialize)]
struct SimianReport {
    #[serde(rename = "check", default)]
    checks: Vec<SimianCheck>,
}

#[derive(Debug, Deserialize)]
struct SimianCheck {
    #[serde(rename = "set", default)]
    sets: Vec<SimianSet>,
}

#[derive(Debug, Deserialize)]
struct SimianSet {
    #[serde(rename = "@lineCount")]
    line_count: usize,
    #[serde(rename = "block", default)]
    blocks: Vec<SimianBlock>,
}

#[derive(Debug, Deserialize)]
struct SimianBlock {
    #[serde(rename = "@sourceFile")]
    source_file: String,
    #[serde(rename = "@startLineNumber")]
    start_line: usize,
}

impl DuplicationParser for SimianParser {
    fn name(&self) -> &'static str {
        "Simian"
    }

    fn accepts(&self, content: &str) -> bool {
        content.contains("<simian")
    }

    fn parse(&self, content: &str, origin: &Path) -> Result<Vec<DuplicationSet>> {
        let report: SimianReport = quick_xml::de::from_str(content)
            .map_err(|e| DryGuardError::parse(origin, e.to_string()))?;

        Ok(report
            .checks
            .into_iter()
            .flat_map(|check| check.sets)
            .filter(|set| !set.blocks.is_empty())
            .map(|set| DuplicationSet {
                lines: set.line_count,
                tokens: None,
                fragment: None,
                blocks: set
                    .blocks
                    .into_iter()
                    .map(|b| CodeLocation::new(b.source_file, b.start_line))
                    .collect(),
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "simian_tests.rs"]
mod tests;
