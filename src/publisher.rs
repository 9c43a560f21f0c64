//! The duplicate code publisher: collects report files of a build and attaches the result.

use std::sync::Arc;

use crate::aggregator::MatrixAggregator;
use crate::build::{Build, DryResultAction};
use crate::collector::FilesParser;
use crate::config::{Config, ThresholdValidation};
use crate::error::Result;
use crate::health::{BuildStatus, HealthDescriptor};
use crate::logger::PluginLogger;
use crate::parser::DuplicationParserRegistry;
use crate::result::DryResult;
use crate::workspace::Workspace;

/// Name used as console prefix and in collector messages.
pub const PLUGIN_NAME: &str = "DRY";

/// Publishes the results of duplicate code analysis reports.
#[derive(Debug, Clone, Default)]
pub struct DryPublisher {
    config: Config,
}

impl DryPublisher {
    /// Publisher with default settings and the given duplication thresholds.
    #[must_use]
    pub fn new(high_threshold: i32, normal_threshold: i32) -> Self {
        Self::from_config(Config {
            high_threshold,
            normal_threshold,
            ..Config::default()
        })
    }

    #[must_use]
    pub fn from_config(config: Config) -> Self {
        if let Some(problem) =
            ThresholdValidation::describe(config.normal_threshold, config.high_threshold)
        {
            tracing::warn!("{problem}");
        }
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Minimum number of duplicated lines for a high priority warning.
    #[must_use]
    pub const fn high_threshold(&self) -> i32 {
        ThresholdValidation::high_threshold(self.config.normal_threshold, self.config.high_threshold)
    }

    /// Minimum number of duplicated lines for a normal priority warning.
    #[must_use]
    pub const fn normal_threshold(&self) -> i32 {
        ThresholdValidation::normal_threshold(
            self.config.normal_threshold,
            self.config.high_threshold,
        )
    }

    /// Pattern as configured, possibly unset or blank.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.config.pattern.as_deref()
    }

    pub fn set_pattern(&mut self, pattern: Option<String>) {
        self.config.pattern = pattern;
    }

    #[must_use]
    pub fn effective_pattern(&self) -> &str {
        self.config.effective_pattern()
    }

    #[must_use]
    pub fn default_encoding(&self) -> Option<&str> {
        self.config.default_encoding.as_deref()
    }

    #[must_use]
    pub const fn health_descriptor(&self) -> HealthDescriptor {
        HealthDescriptor::from_config(&self.config.health)
    }

    /// Parse the report files of `workspace` and attach the result to `build`.
    ///
    /// # Errors
    /// Workspace failures (`Io`, `Interrupted`, `InvalidPattern`) are returned unchanged.
    pub fn perform(
        &self,
        build: &mut Build,
        workspace: &dyn Workspace,
        logger: &mut dyn PluginLogger,
    ) -> Result<Arc<DryResult>> {
        logger.log("Collecting duplicate code analysis files...");

        let registry = DuplicationParserRegistry::new(
            self.normal_threshold(),
            self.high_threshold(),
            workspace.root(),
            self.default_encoding(),
        );
        let collector = FilesParser::new(
            PLUGIN_NAME,
            self.effective_pattern(),
            registry,
            self.config.detect_modules,
        );

        let project = workspace.act(&collector)?;
        logger.log_lines(project.log_messages());

        let result = Arc::new(DryResult::new(
            build,
            self.default_encoding(),
            project,
            self.config.reference.use_previous_build,
            self.config.reference.use_stable_builds_only,
        ));
        build.add_action(DryResultAction::new(
            Arc::clone(&result),
            self.health_descriptor(),
        ));
        tracing::debug!(
            build = build.number(),
            warnings = result.number_of_warnings(),
            "result attached"
        );
        Ok(result)
    }

    /// Run [`Self::perform`] and degrade the build status by the stability thresholds.
    ///
    /// Returns `None` when the build already failed and running on failed
    /// builds is disabled.
    ///
    /// # Errors
    /// Propagates errors of [`Self::perform`].
    pub fn publish(
        &self,
        build: &mut Build,
        workspace: &dyn Workspace,
        logger: &mut dyn PluginLogger,
    ) -> Result<Option<Arc<DryResult>>> {
        if build.status() == BuildStatus::Failure && !self.config.can_run_on_failed {
            logger.log("Skipping publisher since build result is FAILURE");
            return Ok(None);
        }

        let result = self.perform(build, workspace, logger)?;
        let verdict = result.stability(&self.config.thresholds);
        for reason in &verdict.reasons {
            logger.log(reason);
        }
        if verdict.status != BuildStatus::Success {
            logger.log(&format!("Setting build status to {}", verdict.status));
        }
        build.set_status(verdict.status);
        Ok(Some(result))
    }

    /// Aggregator for the runs of a multi-configuration build, bound to this publisher's settings.
    #[must_use]
    pub fn create_aggregator(&self, build: &Build) -> MatrixAggregator {
        MatrixAggregator::new(build.number(), self.config.clone())
    }
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;
