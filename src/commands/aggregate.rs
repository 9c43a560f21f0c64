use std::fs;
use std::io;
use std::path::Path;

use crate::build::Build;
use crate::cli::{AggregateArgs, Cli};
use crate::health::StabilityVerdict;
use crate::logger::{ConsoleLogger, NullLogger, PluginLogger};
use crate::output::{JsonReport, Report};
use crate::publisher::DryPublisher;
use crate::{DryGuardError, EXIT_CONFIG_ERROR, Result};

use super::{color_choice_to_mode, exit_code_for, format_output, load_config, write_output};

#[must_use]
pub fn run_aggregate(args: &AggregateArgs, cli: &Cli) -> i32 {
    match run_aggregate_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Combine the JSON reports of the runs of a matrix build.
///
/// Each report is one axis, named after its file. The combined build takes
/// the highest build number of the runs.
///
/// # Errors
/// Returns an error if a report cannot be read or is not a `dry-guard` JSON report.
pub fn run_aggregate_impl(args: &AggregateArgs, cli: &Cli) -> Result<i32> {
    let config = load_config(args.config.as_deref(), Path::new("."), cli.no_config)?.config;
    let runs = args
        .reports
        .iter()
        .map(|path| read_report(path).map(|report| (path.display().to_string(), report)))
        .collect::<Result<Vec<_>>>()?;

    let number = runs
        .iter()
        .map(|(_, report)| report.result.build_number())
        .max()
        .unwrap_or(1);
    let mut build = Build::new(number);
    let publisher = DryPublisher::from_config(config);
    let mut aggregator = publisher.create_aggregator(&build);

    aggregator.start_build();
    for (axis, report) in &runs {
        if !aggregator.end_run(axis, &report.result) {
            tracing::warn!(axis = %axis, "report given twice, ignored");
        }
    }

    let mut logger: Box<dyn PluginLogger> = if cli.quiet {
        Box::new(NullLogger)
    } else {
        Box::new(ConsoleLogger::new(io::stderr()))
    };
    let result = aggregator.end_build(&mut build, logger.as_mut())?;

    let mut stability = result.stability(&publisher.config().thresholds);
    for (_, report) in &runs {
        stability.status = stability.status.worse(report.summary.status);
    }
    build.set_status(stability.status);
    let stability = StabilityVerdict {
        status: build.status(),
        reasons: stability.reasons,
    };

    let health = build.actions().last().and_then(|action| action.health_report());
    let report = Report::new(&result, health.as_ref(), &stability);
    let output = format_output(
        args.format,
        &report,
        color_choice_to_mode(cli.color),
        cli.verbose,
    )?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(exit_code_for(build.status(), false))
}

fn read_report(path: &Path) -> Result<JsonReport> {
    let content = fs::read_to_string(path).map_err(|source| DryGuardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| DryGuardError::parse(path, e.to_string()))
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
