use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::{DuplicateCode, Priority};

/// Number of warnings per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub normal: usize,
    pub low: usize,
}

impl PriorityCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.high + self.normal + self.low
    }

    /// Count at one priority, or the total when `priority` is `None`.
    #[must_use]
    pub const fn get(&self, priority: Option<Priority>) -> usize {
        match priority {
            None => self.total(),
            Some(Priority::High) => self.high,
            Some(Priority::Normal) => self.normal,
            Some(Priority::Low) => self.low,
        }
    }

    /// Count of warnings with a priority of at least `minimum`.
    #[must_use]
    pub const fn at_least(&self, minimum: Priority) -> usize {
        match minimum {
            Priority::High => self.high,
            Priority::Normal => self.high + self.normal,
            Priority::Low => self.total(),
        }
    }

    pub const fn add(&mut self, priority: Priority) {
        match priority {
            Priority::High => self.high += 1,
            Priority::Normal => self.normal += 1,
            Priority::Low => self.low += 1,
        }
    }

    #[must_use]
    pub fn from_annotations<'a>(annotations: impl IntoIterator<Item = &'a DuplicateCode>) -> Self {
        let mut counts = Self::default();
        for annotation in annotations {
            counts.add(annotation.priority);
        }
        counts
    }
}

/// Outcome of parsing all report files of one workspace.
///
/// Annotations are unique by fingerprint; adding the same block twice keeps
/// the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserResult {
    #[serde(default)]
    annotations: IndexMap<String, DuplicateCode>,
    #[serde(default)]
    modules: IndexSet<String>,
    #[serde(default)]
    files: usize,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    log_messages: Vec<String>,
}

impl ParserResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning. Returns `false` if an identical warning is already present.
    pub fn add_annotation(&mut self, annotation: DuplicateCode) -> bool {
        let key = annotation.fingerprint();
        if self.annotations.contains_key(&key) {
            return false;
        }
        if let Some(module) = &annotation.module_name {
            self.modules.insert(module.clone());
        }
        self.annotations.insert(key, annotation);
        true
    }

    /// Add several warnings and return how many were new.
    pub fn add_annotations(&mut self, annotations: impl IntoIterator<Item = DuplicateCode>) -> usize {
        let mut added = 0;
        for annotation in annotations {
            if self.add_annotation(annotation) {
                added += 1;
            }
        }
        added
    }

    pub fn annotations(&self) -> impl Iterator<Item = &DuplicateCode> {
        self.annotations.values()
    }

    #[must_use]
    pub fn contains(&self, fingerprint: &str) -> bool {
        self.annotations.contains_key(fingerprint)
    }

    #[must_use]
    pub fn number_of_annotations(&self) -> usize {
        self.annotations.len()
    }

    #[must_use]
    pub fn number_of_annotations_at(&self, priority: Priority) -> usize {
        self.annotations
            .values()
            .filter(|a| a.priority == priority)
            .count()
    }

    #[must_use]
    pub fn counts(&self) -> PriorityCounts {
        PriorityCounts::from_annotations(self.annotations.values())
    }

    #[must_use]
    pub fn has_annotations(&self) -> bool {
        !self.annotations.is_empty()
    }

    pub fn add_module(&mut self, module: impl Into<String>) {
        self.modules.insert(module.into());
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }

    pub const fn add_parsed_file(&mut self) {
        self.files += 1;
    }

    #[must_use]
    pub const fn number_of_files(&self) -> usize {
        self.files
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.log_messages.push(message.into());
    }

    #[must_use]
    pub fn log_messages(&self) -> &[String] {
        &self.log_messages
    }

    /// Merge another result into this one (used when combining matrix axes).
    ///
    /// Log messages are not carried over; they belong to the run that produced them.
    pub fn merge(&mut self, other: &Self) {
        for annotation in other.annotations.values() {
            self.add_annotation(annotation.clone());
        }
        for module in &other.modules {
            self.modules.insert(module.clone());
        }
        self.files += other.files;
        self.errors.extend(other.errors.iter().cloned());
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
