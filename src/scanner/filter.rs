use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::split_pattern;
use crate::error::{DryGuardError, Result};

/// Paths never reported, mirroring Ant's default excludes plus our own state dir.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/.git/**",
    "**/.svn/**",
    "**/.hg/**",
    "**/CVS/**",
    "**/.dry-guard/**",
];

pub trait FileFilter {
    /// Decide on a path relative to the scan root.
    fn should_include(&self, path: &Path) -> bool;
}

/// Matches root-relative paths against an Ant-style file set pattern.
///
/// `*` stays within one path segment, `**` spans directories, several
/// patterns may be separated by commas, and a trailing `/` means "everything below".
pub struct PatternFilter {
    includes: GlobSet,
    excludes: GlobSet,
}

impl PatternFilter {
    /// Create a filter from an include pattern and the default excludes.
    ///
    /// # Errors
    /// Returns an error if any pattern is not a valid glob.
    pub fn new(pattern: &str) -> Result<Self> {
        let excludes: Vec<String> = DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect();
        Self::with_excludes(pattern, &excludes)
    }

    /// Create a filter with explicit exclude patterns (replacing the defaults).
    ///
    /// # Errors
    /// Returns an error if any pattern is not a valid glob.
    pub fn with_excludes(pattern: &str, excludes: &[String]) -> Result<Self> {
        let includes = build_set(split_pattern(pattern))?;
        let excludes = build_set(excludes.iter().map(String::as_str))?;
        Ok(Self { includes, excludes })
    }
}

fn build_set<'a>(patterns: impl Iterator<Item = &'a str>) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let normalized = normalize_ant_pattern(pattern);
        let glob = GlobBuilder::new(&normalized)
            .literal_separator(true)
            .build()
            .map_err(|source| DryGuardError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| DryGuardError::InvalidPattern {
        pattern: "combined patterns".to_string(),
        source,
    })
}

fn normalize_ant_pattern(pattern: &str) -> String {
    let mut normalized = pattern.replace('\\', "/");
    if normalized.ends_with('/') {
        normalized.push_str("**");
    }
    normalized
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

impl FileFilter for PatternFilter {
    fn should_include(&self, path: &Path) -> bool {
        let path = to_slash(path);
        self.includes.is_match(&path) && !self.excludes.is_match(&path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
