//! Combines the results of the runs of a multi-configuration (matrix) build.

use std::collections::HashSet;
use std::sync::Arc;

use crate::build::{Build, DryResultAction};
use crate::config::{Config, ThresholdValidation};
use crate::error::{DryGuardError, Result};
use crate::health::HealthDescriptor;
use crate::logger::PluginLogger;
use crate::model::ParserResult;
use crate::result::DryResult;

/// Collects the per-axis results of a matrix build into one result for the parent build.
#[derive(Debug, Clone)]
pub struct MatrixAggregator {
    build_number: u64,
    config: Config,
    project: ParserResult,
    axes: HashSet<String>,
    axis_order: Vec<String>,
}

impl MatrixAggregator {
    #[must_use]
    pub fn new(build_number: u64, config: Config) -> Self {
        Self {
            build_number,
            config,
            project: ParserResult::new(),
            axes: HashSet::new(),
            axis_order: Vec::new(),
        }
    }

    #[must_use]
    pub const fn build_number(&self) -> u64 {
        self.build_number
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn high_threshold(&self) -> i32 {
        ThresholdValidation::high_threshold(self.config.normal_threshold, self.config.high_threshold)
    }

    #[must_use]
    pub const fn normal_threshold(&self) -> i32 {
        ThresholdValidation::normal_threshold(
            self.config.normal_threshold,
            self.config.high_threshold,
        )
    }

    /// Reset the collected state for a new parent build.
    pub fn start_build(&mut self) {
        self.project = ParserResult::new();
        self.axes.clear();
        self.axis_order.clear();
    }

    /// Add the result of one axis. Returns `false` if the axis was already added.
    pub fn end_run(&mut self, axis: &str, result: &DryResult) -> bool {
        if !self.axes.insert(axis.to_string()) {
            tracing::debug!(axis, "ignoring repeated matrix run");
            return false;
        }
        self.axis_order.push(axis.to_string());
        self.project.merge(result.project());
        true
    }

    /// Axes added so far, in order.
    #[must_use]
    pub fn axes(&self) -> &[String] {
        &self.axis_order
    }

    /// Build the combined result and attach it to the parent build.
    ///
    /// # Errors
    /// Returns `Config` if `build` is not the build this aggregator was created for.
    pub fn end_build(
        &mut self,
        build: &mut Build,
        logger: &mut dyn PluginLogger,
    ) -> Result<Arc<DryResult>> {
        if build.number() != self.build_number {
            return Err(DryGuardError::Config(format!(
                "aggregator of build #{} cannot publish to build #{}",
                self.build_number,
                build.number()
            )));
        }
        logger.log(&format!(
            "Computing aggregated duplicate code results of {} configurations",
            self.axis_order.len()
        ));

        let project = std::mem::take(&mut self.project);
        let result = Arc::new(DryResult::new(
            build,
            self.config.default_encoding.as_deref(),
            project,
            self.config.reference.use_previous_build,
            self.config.reference.use_stable_builds_only,
        ));
        build.add_action(DryResultAction::new(
            Arc::clone(&result),
            HealthDescriptor::from_config(&self.config.health),
        ));
        Ok(result)
    }
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
