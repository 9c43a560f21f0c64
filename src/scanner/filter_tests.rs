use std::path::Path;

use super::*;

#[test]
fn default_pattern_matches_any_depth() {
    let filter = PatternFilter::new("**/cpd.xml").unwrap();

    assert!(filter.should_include(Path::new("cpd.xml")));
    assert!(filter.should_include(Path::new("target/cpd.xml")));
    assert!(filter.should_include(Path::new("module/a/target/cpd.xml")));
    assert!(!filter.should_include(Path::new("target/pmd.xml")));
}

#[test]
fn single_star_does_not_cross_directories() {
    let filter = PatternFilter::new("target/*.xml").unwrap();

    assert!(filter.should_include(Path::new("target/cpd.xml")));
    assert!(!filter.should_include(Path::new("target/sub/cpd.xml")));
}

#[test]
fn comma_separated_patterns() {
    let filter = PatternFilter::new("**/cpd.xml, **/simian-*.xml").unwrap();

    assert!(filter.should_include(Path::new("a/cpd.xml")));
    assert!(filter.should_include(Path::new("b/simian-report.xml")));
    assert!(!filter.should_include(Path::new("b/other.xml")));
}

#[test]
fn trailing_slash_means_everything_below() {
    let filter = PatternFilter::new("reports/").unwrap();

    assert!(filter.should_include(Path::new("reports/cpd.xml")));
    assert!(filter.should_include(Path::new("reports/deep/x.xml")));
    assert!(!filter.should_include(Path::new("other/cpd.xml")));
}

#[test]
fn default_excludes_apply() {
    let filter = PatternFilter::new("**/*.xml").unwrap();

    assert!(!filter.should_include(Path::new(".git/config.xml")));
    assert!(!filter.should_include(Path::new("sub/.svn/entries.xml")));
    assert!(!filter.should_include(Path::new(".dry-guard/history.xml")));
    assert!(filter.should_include(Path::new("src/layout.xml")));
}

#[test]
fn explicit_excludes_replace_defaults() {
    let filter =
        PatternFilter::with_excludes("**/*.xml", &["**/generated/**".to_string()]).unwrap();

    assert!(filter.should_include(Path::new(".git/config.xml")));
    assert!(!filter.should_include(Path::new("generated/cpd.xml")));
}

#[test]
fn backslash_patterns_are_normalized() {
    let filter = PatternFilter::new("target\\cpd.xml").unwrap();
    assert!(filter.should_include(Path::new("target/cpd.xml")));
}

#[test]
fn invalid_pattern_returns_error() {
    let result = PatternFilter::new("[invalid");
    assert!(result.is_err());
}
