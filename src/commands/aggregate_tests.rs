use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use super::*;
use crate::build::Build;
use crate::health::{BuildStatus, StabilityVerdict};
use crate::model::{CodeLocation, DuplicateCode, ParserResult, Priority};
use crate::output::{JsonFormatter, OutputFormatter};
use crate::result::DryResult;
use crate::{EXIT_SUCCESS, EXIT_THRESHOLD_EXCEEDED};

fn write_report(dir: &TempDir, name: &str, build: u64, files: &[&str], status: BuildStatus) -> PathBuf {
    let mut project = ParserResult::new();
    project.add_parsed_file();
    for file in files {
        project.add_annotation(DuplicateCode::new(
            CodeLocation::new(*file, 1),
            30,
            Priority::Normal,
        ));
    }
    let result = DryResult::new(&Build::new(build), None, project, false, false);
    let verdict = StabilityVerdict {
        status,
        reasons: Vec::new(),
    };
    let json = JsonFormatter
        .format(&Report::new(&result, None, &verdict))
        .unwrap();
    let path = dir.path().join(name);
    fs::write(&path, json).unwrap();
    path
}

fn run(reports: &[PathBuf], extra: &[&str]) -> Result<i32> {
    let mut argv: Vec<String> = ["dry-guard", "--quiet", "--no-config", "aggregate"]
        .iter()
        .map(ToString::to_string)
        .collect();
    argv.extend(reports.iter().map(|p| p.display().to_string()));
    argv.extend(extra.iter().map(ToString::to_string));
    let cli = Cli::parse_from(argv);
    match &cli.command {
        crate::cli::Commands::Aggregate(args) => run_aggregate_impl(args, &cli),
        _ => unreachable!(),
    }
}

#[test]
fn combines_reports() {
    let dir = TempDir::new().unwrap();
    let a = write_report(&dir, "a.json", 3, &["A.java", "B.java"], BuildStatus::Success);
    let b = write_report(&dir, "b.json", 4, &["B.java", "C.java"], BuildStatus::Success);
    let out = dir.path().join("combined.json");

    let code = run(&[a, b], &["-f", "json", "-o", out.to_str().unwrap()]).unwrap();

    assert_eq!(code, EXIT_SUCCESS);
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(value["summary"]["build"], 4);
    assert_eq!(value["summary"]["warnings"], 3);
    assert_eq!(value["summary"]["files"], 2);
}

#[test]
fn combined_report_carries_health() {
    let dir = TempDir::new().unwrap();
    let a = write_report(&dir, "a.json", 1, &["A.java", "B.java"], BuildStatus::Success);
    let b = write_report(&dir, "b.json", 1, &["C.java"], BuildStatus::Success);
    let config = dir.path().join(".dry-guard.toml");
    fs::write(&config, "version = \"2\"\n\n[health]\nhealthy = 0\nunhealthy = 10\n").unwrap();
    let out = dir.path().join("combined.json");

    let mut argv = vec![
        "dry-guard".to_string(),
        "--quiet".to_string(),
        "aggregate".to_string(),
    ];
    argv.extend([a, b].iter().map(|p| p.display().to_string()));
    argv.extend(
        ["-c", config.to_str().unwrap(), "-f", "json", "-o", out.to_str().unwrap()]
            .iter()
            .map(ToString::to_string),
    );
    let cli = Cli::parse_from(argv);
    let crate::cli::Commands::Aggregate(args) = &cli.command else {
        unreachable!()
    };

    assert_eq!(run_aggregate_impl(args, &cli).unwrap(), EXIT_SUCCESS);
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(value["health"]["score"], 70);
    assert_eq!(value["health"]["count"], 3);
}

#[test]
fn unstable_axis_makes_build_unstable() {
    let dir = TempDir::new().unwrap();
    let a = write_report(&dir, "a.json", 1, &["A.java"], BuildStatus::Success);
    let b = write_report(&dir, "b.json", 1, &[], BuildStatus::Unstable);

    assert_eq!(run(&[a, b], &[]).unwrap(), EXIT_THRESHOLD_EXCEEDED);
}

#[test]
fn invalid_report_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{}").unwrap();

    let err = run(&[path], &[]).unwrap_err();
    assert!(matches!(err, DryGuardError::Parse { .. }));
}

#[test]
fn missing_report_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = run(&[dir.path().join("missing.json")], &[]).unwrap_err();
    assert!(matches!(err, DryGuardError::FileRead { .. }));
}
