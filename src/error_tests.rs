use std::path::PathBuf;

use super::*;

#[test]
fn error_display_config() {
    let err = DryGuardError::Config("invalid threshold".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid threshold");
}

#[test]
fn error_display_file_read() {
    let err = DryGuardError::FileRead {
        path: PathBuf::from("cpd.xml"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("cpd.xml"));
}

#[test]
fn error_display_parse() {
    let err = DryGuardError::parse("target/cpd.xml", "unexpected end of file");
    assert_eq!(
        err.to_string(),
        "Failed to parse duplication report target/cpd.xml: unexpected end of file"
    );
}

#[test]
fn error_display_interrupted() {
    assert_eq!(
        DryGuardError::Interrupted.to_string(),
        "Build interrupted while collecting duplication reports"
    );
}

#[test]
fn io_error_converts_and_keeps_message() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
    let err: DryGuardError = io.into();
    assert!(matches!(err, DryGuardError::Io(_)));
    assert_eq!(err.to_string(), "IO error: access denied");
}

#[test]
fn error_type_returns_correct_type() {
    assert_eq!(
        DryGuardError::Config("test".to_string()).error_type(),
        "Config"
    );
    assert_eq!(
        DryGuardError::Io(std::io::Error::other("test")).error_type(),
        "IO"
    );
    assert_eq!(DryGuardError::parse("a", "b").error_type(), "Parse");
    assert_eq!(DryGuardError::Interrupted.error_type(), "Interrupted");
}

#[test]
fn invalid_pattern_has_source() {
    let source = globset::Glob::new("[invalid").unwrap_err();
    let err = DryGuardError::InvalidPattern {
        pattern: "[invalid".to_string(),
        source,
    };
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(err.to_string(), "Invalid glob pattern: [invalid");
}
