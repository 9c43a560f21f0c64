//! Integration tests for the `config` subcommands.

mod common;

use common::{HIGH_DUPLICATION, LEGACY_CONFIG, TestFixture};
use predicates::prelude::*;

#[test]
fn config_migrate_rewrites_legacy_file() {
    let fixture = TestFixture::new();
    fixture.create_config(LEGACY_CONFIG);

    dry_guard!()
        .current_dir(fixture.path())
        .args(["config", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated configuration written to"))
        .stderr(predicate::str::contains(
            "ignoring invalid value 'not-a-number' for unstable_new_all",
        ));

    let content = fixture.read_file(".dry-guard.toml");
    assert!(content.contains("version = \"2\""));
    assert!(content.contains("pattern = \"**/duplicates.xml\""));
    assert!(content.contains("high_threshold = 40"));
}

#[test]
fn config_migrate_to_other_file() {
    let fixture = TestFixture::new();
    fixture.create_file("legacy.toml", LEGACY_CONFIG);

    dry_guard!()
        .current_dir(fixture.path())
        .args(["config", "migrate", "-c", "legacy.toml", "-o", "new.toml"])
        .assert()
        .success();

    assert_eq!(fixture.read_file("legacy.toml"), LEGACY_CONFIG);
    assert!(fixture.read_file("new.toml").contains("[health]"));
}

#[test]
fn config_migrate_rejects_v2() {
    let fixture = TestFixture::new();
    fixture.create_config("version = \"2\"\n");

    dry_guard!()
        .current_dir(fixture.path())
        .args(["config", "migrate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a version 1 configuration"));
}

#[test]
fn config_show_defaults() {
    let fixture = TestFixture::new();

    dry_guard!()
        .current_dir(fixture.path())
        .args(["--no-config", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Source: built-in defaults"))
        .stdout(predicate::str::contains("normal_threshold = 25"));
}

#[test]
fn config_show_migrates_legacy_on_load() {
    let fixture = TestFixture::new();
    fixture.create_config(LEGACY_CONFIG);

    dry_guard!()
        .current_dir(fixture.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(migrated from version 1)"))
        .stdout(predicate::str::contains("normal_threshold = 20"));
}

#[test]
fn legacy_config_is_used_by_check() {
    let fixture = TestFixture::new();
    fixture.create_config(LEGACY_CONFIG);
    // 60 lines with high = 40 gives two high priority warnings, below the failed limit of 3
    fixture.create_cpd_report("build/duplicates.xml", &[HIGH_DUPLICATION]);

    dry_guard!()
        .current_dir(fixture.path())
        .args(["check", "--no-history", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 high, 0 normal, 0 low)"))
        .stdout(predicate::str::contains("Health: 80%"));
}
