//! Finds report files in a workspace and parses them into one [`ParserResult`].

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use rayon::prelude::*;

use crate::error::{DryGuardError, Result};
use crate::model::{DuplicateCode, ParserResult};
use crate::module::ModuleDetector;
use crate::parser::DuplicationParserRegistry;
use crate::scanner::{DirectoryScanner, FileScanner, PatternFilter};
use crate::workspace::CancellationToken;

/// Outcome for a single report file.
enum FileOutcome {
    Parsed {
        file: String,
        module: Option<String>,
        warnings: Vec<DuplicateCode>,
    },
    Skipped(String),
}

pub struct FilesParser {
    plugin_name: String,
    pattern: String,
    registry: DuplicationParserRegistry,
    detect_modules: bool,
}

impl FilesParser {
    #[must_use]
    pub fn new(
        plugin_name: impl Into<String>,
        pattern: impl Into<String>,
        registry: DuplicationParserRegistry,
        detect_modules: bool,
    ) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            pattern: pattern.into(),
            registry,
            detect_modules,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub const fn registry(&self) -> &DuplicationParserRegistry {
        &self.registry
    }

    /// Scan `root` for report files and parse all of them.
    ///
    /// Files that cannot be parsed are recorded as errors in the result.
    ///
    /// # Errors
    /// Returns `InvalidPattern` for a bad pattern, `Io` if the tree cannot be
    /// walked or a file cannot be read, and `Interrupted` once `cancel` is set.
    pub fn parse(&self, root: &Path, cancel: &CancellationToken) -> Result<ParserResult> {
        let mut result = ParserResult::new();
        result.log(format!(
            "Finding all files that match the pattern {}",
            self.pattern
        ));

        let scanner = DirectoryScanner::new(PatternFilter::new(&self.pattern)?);
        let files = scanner.scan(root)?;
        if files.is_empty() {
            let message = format!(
                "No files found for pattern '{}'. Configuration error?",
                self.pattern
            );
            result.log(message.clone());
            result.add_error(message);
            return Ok(result);
        }

        if !self.registry.supports_encoding()
            && let Some(encoding) = self.registry.encoding()
        {
            result.log(format!(
                "Encoding '{encoding}' is not supported, reading files as UTF-8"
            ));
        }
        result.log(format!(
            "Parsing {} files in {}",
            files.len(),
            root.display()
        ));
        tracing::info!(plugin = %self.plugin_name, files = files.len(), "parsing report files");

        let detector = self.detect_modules.then(|| ModuleDetector::new(root));
        let outcomes = files
            .par_iter()
            .map(|file| {
                if cancel.is_cancelled() {
                    return Err(DryGuardError::Interrupted);
                }
                self.parse_file(root, file, detector.as_ref())
            })
            .collect::<Result<Vec<_>>>()?;

        for outcome in outcomes {
            Self::merge(&mut result, outcome);
        }
        Ok(result)
    }

    fn parse_file(
        &self,
        root: &Path,
        file: &Path,
        detector: Option<&ModuleDetector>,
    ) -> Result<FileOutcome> {
        let relative = display_relative(root, file);
        let bytes = match fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Ok(FileOutcome::Skipped(format!(
                    "Skipping file '{relative}' because there is no permission to read it."
                )));
            }
            Err(source) => {
                return Err(DryGuardError::FileRead {
                    path: file.to_path_buf(),
                    source,
                });
            }
        };
        if bytes.is_empty() {
            return Ok(FileOutcome::Skipped(format!(
                "Skipping file '{relative}' because it's empty."
            )));
        }

        let content = self.registry.decode(&bytes);
        match self.registry.parse(&content, file) {
            Ok(mut warnings) => {
                let module = detector.and_then(|d| d.guess_module_name(file));
                if let Some(module) = &module {
                    for warning in &mut warnings {
                        warning.module_name = Some(module.clone());
                    }
                }
                Ok(FileOutcome::Parsed {
                    file: relative,
                    module,
                    warnings,
                })
            }
            Err(e) => {
                tracing::warn!(file = %relative, error = %e, "report could not be parsed");
                Ok(FileOutcome::Skipped(format!(
                    "Parsing of file '{relative}' failed: {e}"
                )))
            }
        }
    }

    fn merge(result: &mut ParserResult, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Parsed {
                file,
                module,
                warnings,
            } => {
                let total = warnings.len();
                let unique = result.add_annotations(warnings);
                result.add_parsed_file();
                let module_text = module.as_ref().map_or_else(String::new, |m| {
                    result.add_module(m.clone());
                    format!(" of module {m}")
                });
                result.log(format!(
                    "Successfully parsed file {file}{module_text} with {unique} unique warnings and {} duplicates.",
                    total - unique
                ));
            }
            FileOutcome::Skipped(message) => {
                result.log(message.clone());
                result.add_error(message);
            }
        }
    }
}

fn display_relative(root: &Path, file: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
