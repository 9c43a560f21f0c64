mod mock_fs;

use std::path::{Path, PathBuf};

use mock_fs::MockFileSystem;

use super::*;
use crate::model::Priority;

#[test]
fn load_uses_defaults_without_files() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    let result = loader.load(Path::new("/ws")).unwrap();

    assert_eq!(result.config, Config::default());
    assert!(result.source.is_none());
    assert!(!result.migrated);
}

#[test]
fn load_prefers_workspace_config() {
    let fs = MockFileSystem::new()
        .with_file("/ws/.dry-guard.toml", "high_threshold = 70\nnormal_threshold = 35")
        .with_file("/home/user/.config/dry-guard/config.toml", "high_threshold = 90");
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load(Path::new("/ws")).unwrap();

    assert_eq!(result.config.high_threshold, 70);
    assert_eq!(result.source, Some(PathBuf::from("/ws/.dry-guard.toml")));
}

#[test]
fn load_falls_back_to_user_config() {
    let fs = MockFileSystem::new().with_file(
        "/home/user/.config/dry-guard/config.toml",
        "pattern = \"**/simian.xml\"",
    );
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load(Path::new("/ws")).unwrap();

    assert_eq!(result.config.pattern.as_deref(), Some("**/simian.xml"));
}

#[test]
fn load_without_user_dir_uses_defaults() {
    let fs = MockFileSystem::new().with_config_dir(None);
    let loader = FileConfigLoader::with_fs(fs);

    assert!(loader.load(Path::new("/ws")).unwrap().source.is_none());
}

#[test]
fn version_one_is_migrated() {
    let fs = MockFileSystem::new().with_file(
        "/cfg.toml",
        r#"
version = "1"
healthy = "3"
unhealthy = "30"
failed_total_all = "12"
use_previous_build_as_reference = true
"#,
    );
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load_from_path(Path::new("/cfg.toml")).unwrap();

    assert!(result.migrated);
    assert_eq!(result.config.version.as_deref(), Some("2"));
    assert_eq!(result.config.health.healthy, Some(3));
    assert_eq!(result.config.thresholds.failed_total.all, Some(12));
    assert!(result.config.reference.use_previous_build);
}

#[test]
fn version_two_is_loaded_as_is() {
    let fs = MockFileSystem::new().with_file(
        "/cfg.toml",
        "version = \"2\"\n[health]\nthreshold_limit = \"high\"\n",
    );
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load_from_path(Path::new("/cfg.toml")).unwrap();

    assert!(!result.migrated);
    assert_eq!(result.config.health.threshold_limit, Priority::High);
}

#[test]
fn unsupported_version_is_rejected() {
    let fs = MockFileSystem::new().with_file("/cfg.toml", "version = \"3\"");
    let loader = FileConfigLoader::with_fs(fs);

    let err = loader.load_from_path(Path::new("/cfg.toml")).unwrap_err();

    assert!(err.to_string().contains("Unsupported config version '3'"));
}

#[test]
fn missing_file_reports_path() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());

    let err = loader.load_from_path(Path::new("/nope.toml")).unwrap_err();

    assert!(matches!(err, DryGuardError::FileRead { ref path, .. } if path == Path::new("/nope.toml")));
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let fs = MockFileSystem::new().with_file("/cfg.toml", "high_threshold = ");
    let loader = FileConfigLoader::with_fs(fs);

    let err = loader.load_from_path(Path::new("/cfg.toml")).unwrap_err();

    assert!(matches!(err, DryGuardError::TomlParse(_)));
}

#[test]
fn semantic_validation_runs_after_migration() {
    let fs = MockFileSystem::new().with_file(
        "/cfg.toml",
        "version = \"1\"\nhealthy = \"20\"\nunhealthy = \"10\"\n",
    );
    let loader = FileConfigLoader::with_fs(fs);

    let err = loader.load_from_path(Path::new("/cfg.toml")).unwrap_err();

    assert!(matches!(err, DryGuardError::Config(_)));
}
