//! Integration tests for the `init` command.

mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn init_creates_config() {
    let fixture = TestFixture::new();

    dry_guard!()
        .current_dir(fixture.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let content = fixture.read_file(".dry-guard.toml");
    assert!(content.contains("version = \"2\""));
    assert!(content.contains("pattern = \"**/cpd.xml\""));
}

#[test]
fn init_refuses_existing_config() {
    let fixture = TestFixture::new();
    fixture.create_config("# keep me\n");

    dry_guard!()
        .current_dir(fixture.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Use --force to overwrite"));

    assert_eq!(fixture.read_file(".dry-guard.toml"), "# keep me\n");
}

#[test]
fn init_force_then_check() {
    let fixture = TestFixture::new();
    fixture.create_config("# keep me\n");

    dry_guard!()
        .current_dir(fixture.path())
        .args(["init", "--force"])
        .assert()
        .success();

    dry_guard!()
        .current_dir(fixture.path())
        .args(["check", "--no-history"])
        .assert()
        .success();
}
