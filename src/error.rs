use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DryGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to parse duplication report {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Build interrupted while collecting duplication reports")]
    Interrupted,

    #[error("Could not lock state file {path}: {message}")]
    StateLock { path: PathBuf, message: String },
}

impl DryGuardError {
    /// Short machine-friendly name of the error category.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::TomlParse(_) | Self::TomlSerialize(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } => "Pattern",
            Self::Io(_) => "IO",
            Self::JsonSerialize(_) => "Serialization",
            Self::Parse { .. } => "Parse",
            Self::Interrupted => "Interrupted",
            Self::StateLock { .. } => "State",
        }
    }

    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DryGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
