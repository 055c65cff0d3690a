#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the monitoring-plugin binary.
#[macro_export]
macro_rules! monitoring_plugin {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("monitoring-plugin"))
    };
}

/// Exit codes the monitoring core expects.
pub const EXIT_OK: i32 = 0;
pub const EXIT_WARNING: i32 = 1;
pub const EXIT_CRITICAL: i32 = 2;
pub const EXIT_UNKNOWN: i32 = 3;

/// Report configuration overriding every section setting.
pub const CUSTOM_SECTIONS_CONFIG: &str = r#"
branding = "check_demo v1.2.0"

[sections]
errors_label = "PROBLEMS"
thresholds_label = "LIMITS"
detailed_info_label = "CONTEXT"
"#;

/// Report configuration hiding both list sections.
pub const HIDDEN_SECTIONS_CONFIG: &str = r"
[sections]
hide_errors = true
hide_thresholds = true
";

/// Temporary directory holding configuration files for one test.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Writes `content` to `name` and returns its full path.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes a report configuration file and returns its path.
    pub fn create_config(&self, content: &str) -> PathBuf {
        self.create_file("monitoring-plugin.toml", content)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
