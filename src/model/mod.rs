//! Domain types shared by the parsers, the collector and the publisher.

mod annotation;
mod project;

pub use annotation::{CodeLocation, DuplicateCode, Priority};
pub use project::{ParserResult, PriorityCounts};
