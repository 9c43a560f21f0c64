pub mod aggregator;
pub mod build;
pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod error;
pub mod health;
pub mod history;
pub mod logger;
pub mod logging;
pub mod model;
pub mod module;
pub mod output;
pub mod parser;
pub mod publisher;
pub mod result;
pub mod scanner;
pub mod state;
pub mod workspace;

pub use aggregator::MatrixAggregator;
pub use build::{Build, DryResultAction};
pub use error::{DryGuardError, Result};
pub use publisher::DryPublisher;
pub use result::DryResult;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_THRESHOLD_EXCEEDED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
