use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, ConfigAction, ConfigArgs};
use crate::config::{CONFIG_VERSION, CONFIG_VERSION_V1, LegacyConfig, validate_config_semantics};
use crate::{DryGuardError, EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::load_config;

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    let outcome = match &args.action {
        ConfigAction::Migrate { config, output } => {
            run_config_migrate_impl(config, output.as_deref()).map(|(path, warnings)| {
                for warning in warnings {
                    eprintln!("Warning: {warning}");
                }
                println!("Migrated configuration written to {}", path.display());
            })
        }
        ConfigAction::Show { config } => {
            run_config_show_impl(config.as_deref(), cli.no_config).map(|text| print!("{text}"))
        }
    };

    match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Rewrite a version 1 configuration file as version 2.
///
/// Writes to `output`, or replaces `config_path` when no output is given.
/// Returns the written path and the values dropped during migration.
///
/// # Errors
/// Returns an error if the file is missing, is not a version 1 record, or
/// the migrated configuration is invalid.
pub fn run_config_migrate_impl(
    config_path: &Path,
    output: Option<&Path>,
) -> Result<(PathBuf, Vec<String>)> {
    let content = fs::read_to_string(config_path).map_err(|source| DryGuardError::FileRead {
        path: config_path.to_path_buf(),
        source,
    })?;

    let value: toml::Value = toml::from_str(&content)?;
    let version = value.get("version").and_then(toml::Value::as_str);
    if version != Some(CONFIG_VERSION_V1) {
        return Err(DryGuardError::Config(format!(
            "{} is not a version {CONFIG_VERSION_V1} configuration (found version '{}')",
            config_path.display(),
            version.unwrap_or(CONFIG_VERSION)
        )));
    }

    let migration = value.try_into::<LegacyConfig>()?.migrate();
    validate_config_semantics(&migration.config)?;

    let target = output.unwrap_or(config_path).to_path_buf();
    let text = toml::to_string_pretty(&migration.config)?;
    fs::write(&target, text)?;
    Ok((target, migration.warnings))
}

/// Render the effective configuration as TOML.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or serialized.
pub fn run_config_show_impl(config_path: Option<&Path>, no_config: bool) -> Result<String> {
    let loaded = load_config(config_path, Path::new("."), no_config)?;

    let mut text = String::new();
    match &loaded.source {
        Some(source) if loaded.migrated => {
            let _ = writeln!(
                text,
                "# Source: {} (migrated from version {CONFIG_VERSION_V1})",
                source.display()
            );
        }
        Some(source) => {
            let _ = writeln!(text, "# Source: {}", source.display());
        }
        None => text.push_str("# Source: built-in defaults\n"),
    }
    for warning in &loaded.warnings {
        let _ = writeln!(text, "# Warning: {warning}");
    }
    text.push_str(&toml::to_string_pretty(&loaded.config)?);
    Ok(text)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
