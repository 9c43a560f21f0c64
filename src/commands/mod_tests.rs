use tempfile::TempDir;

use super::*;
use crate::EXIT_THRESHOLD_EXCEEDED;

#[test]
fn exit_code_follows_status() {
    assert_eq!(exit_code_for(BuildStatus::Success, false), EXIT_SUCCESS);
    assert_eq!(exit_code_for(BuildStatus::Unstable, false), EXIT_THRESHOLD_EXCEEDED);
    assert_eq!(exit_code_for(BuildStatus::Failure, false), EXIT_THRESHOLD_EXCEEDED);
}

#[test]
fn warn_only_always_succeeds() {
    assert_eq!(exit_code_for(BuildStatus::Unstable, true), EXIT_SUCCESS);
    assert_eq!(exit_code_for(BuildStatus::Failure, true), EXIT_SUCCESS);
}

#[test]
fn no_config_ignores_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".dry-guard.toml"), "high_threshold = 99\n").unwrap();

    let loaded = load_config(None, dir.path(), true).unwrap();

    assert_eq!(loaded.config.high_threshold, 50);
    assert!(loaded.source.is_none());
}

#[test]
fn workspace_config_is_found() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".dry-guard.toml"), "high_threshold = 99\n").unwrap();

    let loaded = load_config(None, dir.path(), false).unwrap();

    assert_eq!(loaded.config.high_threshold, 99);
    assert_eq!(loaded.source, Some(dir.path().join(".dry-guard.toml")));
}

#[test]
fn explicit_config_path_wins() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".dry-guard.toml"), "high_threshold = 99\n").unwrap();
    let custom = dir.path().join("custom.toml");
    std::fs::write(&custom, "high_threshold = 70\n").unwrap();

    let loaded = load_config(Some(&custom), dir.path(), false).unwrap();

    assert_eq!(loaded.config.high_threshold, 70);
}

#[test]
fn write_output_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports/out.txt");

    write_output(Some(&path), "content", true).unwrap();

    assert_eq!(std::fs::read_to_string(path).unwrap(), "content");
}

#[test]
fn color_choice_mapping() {
    assert_eq!(color_choice_to_mode(ColorChoice::Auto), ColorMode::Auto);
    assert_eq!(color_choice_to_mode(ColorChoice::Always), ColorMode::Always);
    assert_eq!(color_choice_to_mode(ColorChoice::Never), ColorMode::Never);
}
