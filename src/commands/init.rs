use std::fs;

use crate::cli::InitArgs;
use crate::{DryGuardError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Initializes a new configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(DryGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# dry-guard configuration file
version = "2"

# Report files to parse (Ant-style, comma-separated; default: "**/cpd.xml")
pattern = "**/cpd.xml"

# Minimum number of duplicated lines for high priority warnings
high_threshold = 50

# Minimum number of duplicated lines for normal priority warnings
normal_threshold = 25

# Encoding of the report files (UTF-8, US-ASCII or ISO-8859-1)
# default_encoding = "UTF-8"

# Derive module names from pom.xml / build.xml
detect_modules = false

# Publish results even if the build already failed
can_run_on_failed = false

[health]
# 100% health below this many warnings, 0% above `unhealthy`
# healthy = 0
# unhealthy = 20
# Lowest priority counted towards health: "high", "normal" or "low"
threshold_limit = "low"

[thresholds]
# Compare new warnings as count deltas against the reference build
use_delta_values = false
can_compute_new = true

# Mark the build unstable / failed when a count exceeds the limit
# [thresholds.unstable_total]
# all = 10
# high = 0
# [thresholds.failed_new]
# all = 5

[reference]
# Only compare with the immediately preceding build
use_previous_build = false
# Only compare with successful builds
use_stable_builds_only = false

[history]
enabled = true
max_entries = 20
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
