use std::path::Path;

use serde::Deserialize;

use crate::error::{DryGuardError, Result};
use crate::model::CodeLocation;

use super::{DuplicationParser, DuplicationSet};

/// PMD copy/paste detector reports (`<pmd-cpd>`).
pub struct CpdParser;

#[derive(Debug, Deserialize)]
struct CpdReport {
    #[serde(rename = "duplication", default)]
    duplications: Vec<CpdDuplication>,
}

#[derive(Debug, Deserialize)]
struct CpdDuplication {
    #[serde(rename = "@lines")]
    lines: usize,
    #[serde(rename = "@tokens", default)]
    tokens: Option<usize>,
    #[serde(rename = "file", default)]
    files: Vec<CpdFile>,
    #[serde(default)]
    codefragment: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CpdFile {
    #[serde(rename = "@line")]
    line: usize,
    #[serde(rename = "@path")]
    path: String,
}

impl DuplicationParser for CpdParser {
    fn name(&self) -> &'static str {
        "CPD"
    }

    fn accepts(&self, content: &str) -> bool {
        content.contains("<pmd-cpd")
    }

    fn parse(&self, content: &str, origin: &Path) -> Result<Vec<DuplicationSet>> {
        let report: CpdReport = quick_xml::de::from_str(content)
            .map_err(|e| DryGuardError::parse(origin, e.to_string()))?;

        Ok(report
            .duplications
            .into_iter()
            .filter(|d| !d.files.is_empty())
            .map(|d| DuplicationSet {
                lines: d.lines,
                tokens: d.tokens,
                fragment: d.codefragment,
                blocks: d
                    .files
                    .into_iter()
                    .map(|f| CodeLocation::new(f.path, f.line))
                    .collect(),
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "cpd_tests.rs"]
mod tests;
