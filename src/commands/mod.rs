//! Subcommand implementations behind the `dry-guard` binary.

pub mod aggregate;
pub mod check;
pub mod config;
pub mod init;

use std::fs;
use std::path::Path;

pub use aggregate::{run_aggregate, run_aggregate_impl};
pub use check::{run_check, run_check_impl};
pub use config::{run_config, run_config_migrate_impl, run_config_show_impl};
pub use init::{generate_config_template, run_init, run_init_impl};

use crate::cli::ColorChoice;
use crate::config::{ConfigLoader, FileConfigLoader, LoadResult};
use crate::error::Result;
use crate::health::BuildStatus;
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, Report, TextFormatter,
};
use crate::{EXIT_SUCCESS, EXIT_THRESHOLD_EXCEEDED};

#[must_use]
pub const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Load the configuration for `workspace`, honoring `--config` and `--no-config`.
pub(crate) fn load_config(
    config_path: Option<&Path>,
    workspace: &Path,
    no_config: bool,
) -> Result<LoadResult> {
    if no_config {
        return Ok(LoadResult::default());
    }

    let loader = FileConfigLoader::new();
    let loaded = config_path.map_or_else(
        || loader.load(workspace),
        |path| loader.load_from_path(path),
    )?;

    if let Some(source) = &loaded.source {
        tracing::debug!(path = %source.display(), migrated = loaded.migrated, "configuration loaded");
    }
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }
    Ok(loaded)
}

pub(crate) fn format_output(
    format: OutputFormat,
    report: &Report<'_>,
    color_mode: ColorMode,
    verbose: u8,
) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(report),
        OutputFormat::Json => JsonFormatter.format(report),
    }
}

/// Write to `output_path`, or to stdout unless `quiet` is set.
pub(crate) fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        crate::state::ensure_parent_dir(path)?;
        fs::write(path, content)?;
        if !quiet {
            eprintln!("Report written to {}", path.display());
        }
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

pub(crate) const fn exit_code_for(status: BuildStatus, warn_only: bool) -> i32 {
    match status {
        BuildStatus::Success => EXIT_SUCCESS,
        _ if warn_only => EXIT_SUCCESS,
        BuildStatus::Unstable | BuildStatus::Failure => EXIT_THRESHOLD_EXCEEDED,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
