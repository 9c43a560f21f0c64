use std::io;

use crate::build::Build;
use crate::cli::{CheckArgs, Cli};
use crate::config::Config;
use crate::health::{BuildStatus, StabilityVerdict};
use crate::history::{HistoryStore, next_build_number};
use crate::logger::{ConsoleLogger, NullLogger, PluginLogger};
use crate::output::Report;
use crate::publisher::DryPublisher;
use crate::workspace::{LocalWorkspace, Workspace};
use crate::{EXIT_CONFIG_ERROR, Result};

use super::{color_choice_to_mode, exit_code_for, format_output, load_config, write_output};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Publish the reports of one workspace as a new build.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded, the workspace
/// cannot be scanned, or the report or history cannot be written.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli) -> Result<i32> {
    // 1. Open workspace and load configuration
    let workspace = LocalWorkspace::open(&args.workspace)?;
    let mut config = load_config(args.config.as_deref(), workspace.root(), cli.no_config)?.config;

    // 2. Apply CLI argument overrides
    apply_cli_overrides(&mut config, args);

    // 3. Load build history
    let history = (config.history.enabled && !args.no_history)
        .then(|| HistoryStore::for_workspace(workspace.root(), config.history.max_entries));
    let (number, records) = match &history {
        Some(store) => {
            let records = store.load()?;
            (next_build_number(&records), records)
        }
        None => (1, Vec::new()),
    };

    let initial_status = if args.build_failed {
        BuildStatus::Failure
    } else {
        BuildStatus::Success
    };
    let mut build = Build::new(number)
        .with_history(records)
        .with_status(initial_status);

    // 4. Publish
    let publisher = DryPublisher::from_config(config);
    let mut logger: Box<dyn PluginLogger> = if cli.quiet {
        Box::new(NullLogger)
    } else {
        Box::new(ConsoleLogger::new(io::stderr()))
    };
    let published = publisher.publish(&mut build, &workspace, logger.as_mut())?;

    // 5. Render report
    if let Some(result) = &published {
        let stability = StabilityVerdict {
            status: build.status(),
            reasons: result.stability(&publisher.config().thresholds).reasons,
        };
        let health = build.actions().last().and_then(|action| action.health_report());
        let report = Report::new(result, health.as_ref(), &stability);
        let output = format_output(
            args.format,
            &report,
            color_choice_to_mode(cli.color),
            cli.verbose,
        )?;
        write_output(args.output.as_deref(), &output, cli.quiet)?;
    }

    // 6. Record the build
    if let Some(store) = &history {
        store.append(build.to_record())?;
    }

    Ok(exit_code_for(build.status(), args.warn_only))
}

fn apply_cli_overrides(config: &mut Config, args: &CheckArgs) {
    if let Some(pattern) = &args.pattern {
        config.pattern = Some(pattern.clone());
    }
    if let Some(high) = args.high {
        config.high_threshold = high;
    }
    if let Some(normal) = args.normal {
        config.normal_threshold = normal;
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
