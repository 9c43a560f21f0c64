//! Configuration semantic validation.
//!
//! Duplication thresholds are normalized rather than rejected; everything else
//! (glob patterns, health bounds) is checked after parsing.

use globset::Glob;

use crate::config::Config;
use crate::config::model::{DEFAULT_HIGH_THRESHOLD, DEFAULT_NORMAL_THRESHOLD};
use crate::{DryGuardError, Result};

/// Normalizes the pair of duplication thresholds.
///
/// A pair is valid when both values are positive and `high > normal`.
/// An invalid pair is replaced as a whole by the defaults, so callers always
/// observe `high > normal > 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdValidation;

impl ThresholdValidation {
    #[must_use]
    pub const fn is_valid(normal: i32, high: i32) -> bool {
        normal > 0 && high > 0 && high > normal
    }

    #[must_use]
    pub const fn high_threshold(normal: i32, high: i32) -> i32 {
        if Self::is_valid(normal, high) {
            high
        } else {
            DEFAULT_HIGH_THRESHOLD
        }
    }

    #[must_use]
    pub const fn normal_threshold(normal: i32, high: i32) -> i32 {
        if Self::is_valid(normal, high) {
            normal
        } else {
            DEFAULT_NORMAL_THRESHOLD
        }
    }

    /// Human readable complaint about a raw pair, `None` if it is used as is.
    #[must_use]
    pub fn describe(normal: i32, high: i32) -> Option<String> {
        if normal <= 0 || high <= 0 {
            Some(format!(
                "duplication thresholds must be positive (normal = {normal}, high = {high}); \
                 using defaults {DEFAULT_NORMAL_THRESHOLD}/{DEFAULT_HIGH_THRESHOLD}"
            ))
        } else if high <= normal {
            Some(format!(
                "high threshold ({high}) must be greater than normal threshold ({normal}); \
                 using defaults {DEFAULT_NORMAL_THRESHOLD}/{DEFAULT_HIGH_THRESHOLD}"
            ))
        } else {
            None
        }
    }
}

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns an error if a pattern is not a valid glob or the health bounds are inverted.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    validate_pattern(config.effective_pattern())?;
    validate_health_section(config)?;
    Ok(())
}

/// Checks every comma-separated alternative of an Ant-style pattern.
///
/// # Errors
/// Returns `InvalidPattern` for the first alternative that fails to compile.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    for alternative in split_pattern(pattern) {
        Glob::new(alternative).map_err(|source| DryGuardError::InvalidPattern {
            pattern: alternative.to_string(),
            source,
        })?;
    }
    Ok(())
}

/// Split an Ant file set pattern into its comma or newline separated alternatives.
pub fn split_pattern(pattern: &str) -> impl Iterator<Item = &str> {
    pattern
        .split([',', '\n'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

fn validate_health_section(config: &Config) -> Result<()> {
    if let (Some(healthy), Some(unhealthy)) = (config.health.healthy, config.health.unhealthy)
        && healthy >= unhealthy
    {
        return Err(DryGuardError::Config(format!(
            "health.healthy ({healthy}) must be less than health.unhealthy ({unhealthy})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
