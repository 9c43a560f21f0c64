//! Duplication report parsers and the registry that picks one per file.

mod cpd;
mod simian;

pub use cpd::CpdParser;
pub use simian::SimianParser;

use std::path::Path;

use crate::error::{DryGuardError, Result};
use crate::model::{CodeLocation, DuplicateCode, Priority};

/// One set of blocks reported as copies of each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicationSet {
    pub lines: usize,
    pub tokens: Option<usize>,
    pub fragment: Option<String>,
    pub blocks: Vec<CodeLocation>,
}

/// A parser for one report format.
pub trait DuplicationParser: Send + Sync {
    /// Short format name used in log messages.
    fn name(&self) -> &'static str;

    /// Cheap check whether `content` looks like this parser's format.
    fn accepts(&self, content: &str) -> bool;

    /// Parse the report.
    ///
    /// # Errors
    /// Returns `Parse` if the content is not a well-formed report.
    fn parse(&self, content: &str, origin: &Path) -> Result<Vec<DuplicationSet>>;
}

/// Encodings the registry can decode itself. Anything else is read as lossy UTF-8.
const SUPPORTED_ENCODINGS: &[&str] = &["utf-8", "utf8", "us-ascii", "ascii", "iso-8859-1", "latin1"];

/// Picks the parser for a report and turns its duplication sets into
/// prioritized warnings.
pub struct DuplicationParserRegistry {
    parsers: Vec<Box<dyn DuplicationParser>>,
    normal_threshold: usize,
    high_threshold: usize,
    workspace_root: String,
    encoding: Option<String>,
}

impl DuplicationParserRegistry {
    /// Create a registry with all known formats.
    ///
    /// The thresholds are expected to be validated already.
    #[must_use]
    pub fn new(
        normal_threshold: i32,
        high_threshold: i32,
        workspace_root: &Path,
        encoding: Option<&str>,
    ) -> Self {
        Self {
            parsers: vec![Box::new(CpdParser), Box::new(SimianParser)],
            normal_threshold: usize::try_from(normal_threshold).unwrap_or_default(),
            high_threshold: usize::try_from(high_threshold).unwrap_or_default(),
            workspace_root: to_slash(&workspace_root.to_string_lossy()),
            encoding: encoding.map(str::to_string),
        }
    }

    #[must_use]
    pub const fn thresholds(&self) -> (usize, usize) {
        (self.normal_threshold, self.high_threshold)
    }

    #[must_use]
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Whether the configured encoding is decoded exactly.
    #[must_use]
    pub fn supports_encoding(&self) -> bool {
        self.encoding.as_deref().is_none_or(|e| {
            SUPPORTED_ENCODINGS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(e.trim()))
        })
    }

    /// Decode raw report bytes with the configured encoding.
    #[must_use]
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self.encoding.as_deref().map(|e| e.trim().to_lowercase()) {
            Some(e) if e == "iso-8859-1" || e == "latin1" => {
                bytes.iter().map(|&b| char::from(b)).collect()
            }
            _ => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Parse one report into warnings, one per duplicated block.
    ///
    /// # Errors
    /// Returns `Parse` if no parser accepts the content or the accepting parser fails.
    pub fn parse(&self, content: &str, origin: &Path) -> Result<Vec<DuplicateCode>> {
        let parser = self
            .parsers
            .iter()
            .find(|p| p.accepts(content))
            .ok_or_else(|| {
                DryGuardError::parse(origin, "no parser accepts this file (expected CPD or Simian XML)")
            })?;

        tracing::debug!(parser = parser.name(), file = %origin.display(), "parsing duplication report");
        let sets = parser.parse(content, origin)?;
        Ok(sets.iter().flat_map(|set| self.expand(set)).collect())
    }

    fn expand(&self, set: &DuplicationSet) -> Vec<DuplicateCode> {
        let priority = Priority::from_line_count(set.lines, self.normal_threshold, self.high_threshold);
        let blocks: Vec<CodeLocation> = set
            .blocks
            .iter()
            .map(|b| CodeLocation::new(self.relativize(&b.file_name), b.start_line))
            .collect();

        blocks
            .iter()
            .enumerate()
            .map(|(index, location)| {
                let links = blocks
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != index)
                    .map(|(_, l)| l.clone())
                    .collect();
                DuplicateCode::new(location.clone(), set.lines, priority)
                    .with_tokens(set.tokens)
                    .with_fragment(set.fragment.clone())
                    .with_links(links)
            })
            .collect()
    }

    /// Make a reported file name relative to the workspace root when it lies below it.
    #[must_use]
    pub fn relativize(&self, file_name: &str) -> String {
        let file_name = to_slash(file_name);
        let root = self.workspace_root.trim_end_matches('/');
        if root.is_empty() {
            return file_name;
        }
        file_name
            .strip_prefix(root)
            .and_then(|rest| rest.strip_prefix('/'))
            .map_or(file_name.clone(), str::to_string)
    }
}

fn to_slash(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
