#![allow(dead_code)]

use std::fmt::Write;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the dry-guard binary.
#[macro_export]
macro_rules! dry_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("dry-guard"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Reads a file from the temp directory.
    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates the workspace config file.
    pub fn create_config(&self, content: &str) {
        self.create_file(".dry-guard.toml", content);
    }

    /// Creates a CPD report with one duplication per entry of `(lines, [(file, line)])`.
    pub fn create_cpd_report(&self, relative_path: &str, duplications: &[(usize, &[(&str, usize)])]) {
        let mut content = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<pmd-cpd>\n");
        for (lines, blocks) in duplications {
            let _ = writeln!(content, "<duplication lines=\"{lines}\" tokens=\"{}\">", lines * 5);
            for (file, line) in *blocks {
                let _ = writeln!(content, "<file line=\"{line}\" path=\"{file}\"/>");
            }
            let _ = writeln!(content, "<codefragment><![CDATA[// copy of {lines} lines]]></codefragment>");
            content.push_str("</duplication>\n");
        }
        content.push_str("</pmd-cpd>\n");
        self.create_file(relative_path, &content);
    }

    /// Creates a Simian report with a single set.
    pub fn create_simian_report(&self, relative_path: &str, lines: usize, blocks: &[(&str, usize)]) {
        let mut content = String::from("<simian version=\"2.5.10\">\n<check>\n");
        let _ = writeln!(content, "<set lineCount=\"{lines}\">");
        for (file, start) in blocks {
            let _ = writeln!(
                content,
                "<block sourceFile=\"{file}\" startLineNumber=\"{start}\" endLineNumber=\"{}\"/>",
                start + lines - 1
            );
        }
        content.push_str("</set>\n</check>\n</simian>\n");
        self.create_file(relative_path, &content);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// One high priority duplication (60 lines) between two files.
pub const HIGH_DUPLICATION: (usize, &[(&str, usize)]) =
    (60, &[("src/Foo.java", 10), ("src/Bar.java", 80)]);

/// One normal priority duplication (30 lines) between two files.
pub const NORMAL_DUPLICATION: (usize, &[(&str, usize)]) =
    (30, &[("src/Baz.java", 1), ("src/Qux.java", 200)]);

/// Version 2 config that marks the build unstable on any high priority warning.
pub const UNSTABLE_ON_HIGH_CONFIG: &str = r#"
version = "2"

[thresholds.unstable_total]
high = 0
"#;

/// Version 1 (legacy) config.
pub const LEGACY_CONFIG: &str = r#"
version = "1"
healthy = "0"
unhealthy = "10"
threshold_limit = "low"
pattern = "**/duplicates.xml"
high_threshold = 40
normal_threshold = 20
failed_total_all = "3"
unstable_new_all = "not-a-number"
"#;
