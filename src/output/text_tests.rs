use super::*;
use crate::build::Build;
use crate::health::{HealthReport, StabilityVerdict};
use crate::model::{CodeLocation, ParserResult};
use crate::result::DryResult;

fn sample_result() -> DryResult {
    let mut project = ParserResult::new();
    project.add_parsed_file();
    let mut high = DuplicateCode::new(CodeLocation::new("src/A.java", 10), 60, Priority::High)
        .with_tokens(Some(300))
        .with_links(vec![CodeLocation::new("src/B.java", 100)])
        .with_fragment(Some("int x = 1;\nint y = 2;".to_string()));
    high.module_name = Some("core".to_string());
    project.add_annotation(high);
    project.add_annotation(DuplicateCode::new(
        CodeLocation::new("src/Low.java", 1),
        5,
        Priority::Low,
    ));
    project.add_error("Parsing of file 'broken/cpd.xml' failed: bad xml");
    DryResult::new(&Build::new(2), None, project, false, false)
}

fn render(formatter: &TextFormatter, verdict: &StabilityVerdict) -> String {
    let result = sample_result();
    formatter
        .format(&Report::new(&result, None, verdict))
        .unwrap()
}

#[test]
fn lists_warnings_with_links() {
    let output = render(&TextFormatter::new(ColorMode::Never), &StabilityVerdict::default());

    assert!(output.contains("✗ HIGH: src/A.java:10-69"));
    assert!(output.contains("   Lines: 60, tokens: 300, module: core"));
    assert!(output.contains("   Duplicated in: src/B.java:100"));
    assert!(!output.contains("src/Low.java"));
    assert!(!output.contains("| int x = 1;"));
}

#[test]
fn verbose_shows_low_priority_and_fragments() {
    let output = render(
        &TextFormatter::with_verbose(ColorMode::Never, 2),
        &StabilityVerdict::default(),
    );

    assert!(output.contains("· LOW: src/Low.java:1-5"));
    assert!(output.contains("   | int x = 1;"));
    assert!(output.contains("   | int y = 2;"));
}

#[test]
fn summary_and_errors() {
    let verdict = StabilityVerdict {
        status: BuildStatus::Unstable,
        reasons: vec!["1 total high priority warnings exceed the unstable threshold of 0".into()],
    };
    let output = render(&TextFormatter::new(ColorMode::Never), &verdict);

    assert!(output.contains("Errors:\n   Parsing of file 'broken/cpd.xml' failed: bad xml"));
    assert!(output.contains(
        "Summary: 2 duplicate code warnings in 1 files (1 high, 0 normal, 1 low)"
    ));
    assert!(output.contains("New: 2, fixed: 0 (no reference build)"));
    assert!(output.contains("Modules: core"));
    assert!(output.contains("Status: UNSTABLE\n   1 total high priority"));
}

#[test]
fn health_line() {
    let result = sample_result();
    let health = HealthReport {
        score: 75,
        count: 2,
        description: "2 duplicate code blocks found.".to_string(),
    };
    let verdict = StabilityVerdict::default();
    let output = TextFormatter::new(ColorMode::Never)
        .format(&Report::new(&result, Some(&health), &verdict))
        .unwrap();

    assert!(output.contains("Health: 75% - 2 duplicate code blocks found."));
}

#[test]
fn colors_only_when_enabled() {
    let plain = render(&TextFormatter::new(ColorMode::Never), &StabilityVerdict::default());
    let colored = render(&TextFormatter::new(ColorMode::Always), &StabilityVerdict::default());

    assert!(!plain.contains("\x1b["));
    assert!(colored.contains("\x1b[31mHIGH\x1b[0m"));
    assert!(colored.contains("\x1b[32mSUCCESS\x1b[0m"));
}
