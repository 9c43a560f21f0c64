//! A running build and the result actions attached to it.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::health::{BuildStatus, HealthDescriptor, HealthReport, evaluate_health};
use crate::history::BuildRecord;
use crate::result::DryResult;

/// Display name of the result action.
pub const ACTION_DISPLAY_NAME: &str = "Duplicate Code";

/// The build being published.
#[derive(Debug, Clone)]
pub struct Build {
    number: u64,
    timestamp: DateTime<Utc>,
    status: BuildStatus,
    history: Vec<BuildRecord>,
    actions: Vec<Arc<DryResultAction>>,
}

impl Build {
    #[must_use]
    pub fn new(number: u64) -> Self {
        Self {
            number,
            timestamp: Utc::now(),
            status: BuildStatus::Success,
            history: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Earlier builds, oldest first.
    #[must_use]
    pub fn with_history(mut self, history: Vec<BuildRecord>) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: BuildStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub const fn status(&self) -> BuildStatus {
        self.status
    }

    /// Degrade the status. A better status never replaces a worse one.
    pub fn set_status(&mut self, status: BuildStatus) {
        self.status = self.status.worse(status);
    }

    #[must_use]
    pub fn history(&self) -> &[BuildRecord] {
        &self.history
    }

    pub fn add_action(&mut self, action: DryResultAction) -> Arc<DryResultAction> {
        let action = Arc::new(action);
        self.actions.push(Arc::clone(&action));
        action
    }

    #[must_use]
    pub fn actions(&self) -> &[Arc<DryResultAction>] {
        &self.actions
    }

    /// Summary of this build for the history, using the last attached result.
    #[must_use]
    pub fn to_record(&self) -> BuildRecord {
        let record = BuildRecord {
            number: self.number,
            timestamp: self.timestamp,
            status: self.status,
            annotations: None,
        };
        match self.actions.last() {
            Some(action) => {
                record.with_annotations(action.result().project().annotations().cloned().collect())
            }
            None => record,
        }
    }
}

/// Result of the duplicate code analysis attached to a build.
#[derive(Debug, Clone)]
pub struct DryResultAction {
    result: Arc<DryResult>,
    health: HealthDescriptor,
}

impl DryResultAction {
    #[must_use]
    pub const fn new(result: Arc<DryResult>, health: HealthDescriptor) -> Self {
        Self { result, health }
    }

    #[must_use]
    pub const fn result(&self) -> &Arc<DryResult> {
        &self.result
    }

    #[must_use]
    pub const fn health_descriptor(&self) -> &HealthDescriptor {
        &self.health
    }

    #[must_use]
    pub fn health_report(&self) -> Option<HealthReport> {
        evaluate_health(&self.health, &self.result.counts())
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        ACTION_DISPLAY_NAME
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
