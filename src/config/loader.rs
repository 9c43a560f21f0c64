use std::path::{Path, PathBuf};

use crate::error::{DryGuardError, Result};

use super::filesystem::{FileSystem, RealFileSystem};
use super::legacy::LegacyConfig;
use super::model::{CONFIG_VERSION, CONFIG_VERSION_V1, Config};
use super::validation::validate_config_semantics;

/// Name of the per-workspace configuration file.
pub const LOCAL_CONFIG_NAME: &str = ".dry-guard.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// Result of loading a configuration, containing both the config and metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadResult {
    /// The loaded configuration, always in the current version.
    pub config: Config,
    /// File the configuration came from, `None` for built-in defaults.
    pub source: Option<PathBuf>,
    /// True if the file held a version 1 record that was migrated.
    pub migrated: bool,
    /// Values dropped during migration.
    pub warnings: Vec<String>,
}

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// # Errors
    /// Returns an error if a config file exists but cannot be read or parsed.
    fn load(&self, workspace: &Path) -> Result<LoadResult>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<LoadResult>;
}

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.dry-guard.toml` in the workspace root
/// 2. `config.toml` in the platform-specific user config directory
/// 3. `Config::default()` if no config found
#[derive(Debug, Default)]
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
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    /// Parse TOML content, migrating version 1 records.
    ///
    /// # Errors
    /// Returns an error for invalid TOML, an unsupported version, or a config
    /// that fails semantic validation.
    pub fn parse_content(content: &str) -> Result<(Config, bool, Vec<String>)> {
        let value: toml::Value = toml::from_str(content)?;
        let version = value
            .get("version")
            .and_then(toml::Value::as_str)
            .map(str::to_string);

        let (config, migrated, warnings) = match version.as_deref() {
            None | Some(CONFIG_VERSION) => (value.try_into::<Config>()?, false, Vec::new()),
            Some(CONFIG_VERSION_V1) => {
                let migration = value.try_into::<LegacyConfig>()?.migrate();
                (migration.config, true, migration.warnings)
            }
            Some(v) => {
                return Err(DryGuardError::Config(format!(
                    "Unsupported config version '{v}'. Supported versions are \
                     '{CONFIG_VERSION_V1}' (migrated on load) and '{CONFIG_VERSION}'."
                )));
            }
        };

        validate_config_semantics(&config)?;
        Ok((config, migrated, warnings))
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self, workspace: &Path) -> Result<LoadResult> {
        let local = workspace.join(LOCAL_CONFIG_NAME);
        if self.fs.exists(&local) {
            return self.load_from_path(&local);
        }

        if let Some(user) = self.user_config_path()
            && self.fs.exists(&user)
        {
            return self.load_from_path(&user);
        }

        Ok(LoadResult::default())
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadResult> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| DryGuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let (config, migrated, warnings) = Self::parse_content(&content)?;
        Ok(LoadResult {
            config,
            source: Some(path.to_path_buf()),
            migrated,
            warnings,
        })
    }
}

#[cfg(test)]
#[path = "loader_tests/mod.rs"]
mod tests;
