use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Priority of a duplication warning.
///
/// Ordered by severity, so `Priority::High > Priority::Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::High, Self::Normal, Self::Low];

    /// Classify a duplicated block by its length.
    ///
    /// `normal` and `high` are expected to be validated already (`high > normal`).
    #[must_use]
    pub const fn from_line_count(lines: usize, normal: usize, high: usize) -> Self {
        if lines >= high {
            Self::High
        } else if lines >= normal {
            Self::Normal
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "normal" => Ok(Self::Normal),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown priority: {s}")),
        }
    }
}

/// A position in a source file: file name plus first line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeLocation {
    pub file_name: String,
    pub start_line: usize,
}

impl CodeLocation {
    #[must_use]
    pub fn new(file_name: impl Into<String>, start_line: usize) -> Self {
        Self {
            file_name: file_name.into(),
            start_line,
        }
    }
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name, self.start_line)
    }
}

/// One duplicated block of code.
///
/// A duplication set with `n` blocks produces `n` warnings, each linking to
/// the other `n - 1` blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCode {
    pub location: CodeLocation,
    pub line_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<usize>,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_fragment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<CodeLocation>,
}

impl DuplicateCode {
    #[must_use]
    pub const fn new(location: CodeLocation, line_count: usize, priority: Priority) -> Self {
        Self {
            location,
            line_count,
            tokens: None,
            priority,
            module_name: None,
            code_fragment: None,
            links: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_tokens(mut self, tokens: Option<usize>) -> Self {
        self.tokens = tokens;
        self
    }

    #[must_use]
    pub fn with_fragment(mut self, fragment: Option<String>) -> Self {
        self.code_fragment = fragment.filter(|f| !f.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_links(mut self, links: Vec<CodeLocation>) -> Self {
        self.links = links;
        self
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.location.file_name
    }

    #[must_use]
    pub const fn start_line(&self) -> usize {
        self.location.start_line
    }

    /// Last line of the block (inclusive).
    #[must_use]
    pub const fn end_line(&self) -> usize {
        self.location
            .start_line
            .saturating_add(self.line_count.saturating_sub(1))
    }

    /// Identity of this warning within one build.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = self.base_hasher();
        hasher.update(b"\0");
        hasher.update(self.location.start_line.to_le_bytes());
        if let Some(fragment) = &self.code_fragment {
            hasher.update(b"\0");
            hasher.update(fragment.trim().as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    /// Key used to match this warning against a reference build.
    ///
    /// Line numbers drift as code is edited, so the start line only takes part
    /// when there is no code fragment to identify the block. Several warnings
    /// may share a key.
    #[must_use]
    pub fn tracking_key(&self) -> String {
        let mut hasher = self.base_hasher();
        hasher.update(b"\0");
        match &self.code_fragment {
            Some(fragment) => hasher.update(fragment.trim().as_bytes()),
            None => hasher.update(self.location.start_line.to_le_bytes()),
        }
        format!("{:x}", hasher.finalize())
    }

    fn base_hasher(&self) -> Sha256 {
        let mut hasher = Sha256::new();
        hasher.update(self.location.file_name.as_bytes());
        hasher.update(b"\0");
        hasher.update(self.line_count.to_le_bytes());
        let mut linked: Vec<&str> = self.links.iter().map(|l| l.file_name.as_str()).collect();
        linked.sort_unstable();
        for file in linked {
            hasher.update(b"\0");
            hasher.update(file.as_bytes());
        }
        hasher
    }
}

#[cfg(test)]
#[path = "annotation_tests.rs"]
mod tests;
