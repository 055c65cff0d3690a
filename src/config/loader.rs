use std::path::Path;

use crate::error::{PluginError, Result};
use crate::logging::TARGET;

use super::ReportConfig;

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<ReportConfig>;
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Loads [`ReportConfig`] from TOML files.
#[derive(Debug, Clone, Default)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    /// Creates a loader with a custom filesystem (for testing).
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load_from_path(&self, path: &Path) -> Result<ReportConfig> {
        if !self.fs.exists(path) {
            return Err(PluginError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = self.fs.read_to_string(path)?;
        let config = ReportConfig::from_toml_str(&content)?;
        tracing::debug!(target: TARGET, path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

impl ReportConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    /// Returns `TomlParse` for malformed TOML or unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
