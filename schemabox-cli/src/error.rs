//! Error types for the CLI.
//!
//! Each layer keeps its own error enum; [`CliError`] wraps them with the
//! context shown to the user.

use std::path::PathBuf;

use schemabox_codegen::{GenerateError, LintReport, SchemaError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error loading the schema document.
    #[error("Failed to load schema: {0}")]
    Schema(#[from] SchemaError),

    /// The schema has lint errors, or warnings under `deny_warnings`.
    #[error(
        "Schema failed lint with {} error(s) and {} warning(s)",
        report.errors().count(),
        report.warnings().count()
    )]
    Lint { report: LintReport },

    /// Error during code generation.
    #[error("Failed to generate models: {0}")]
    Generate(#[from] GenerateError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Error during file watching.
    #[error("Watch error: {0}")]
    Watch(#[from] WatchError),

    /// Generated output does not match the schema.
    #[error("Check failed: {0}")]
    OutOfDate(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::OutOfDate(_) => 2,
            _ => 1,
        }
    }
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Config file already exists and would be overwritten.
    #[error("Configuration file already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// Invalid TOML syntax or shape.
    #[error("Invalid TOML in {}: {message}", path.display())]
    InvalidToml { path: PathBuf, message: String },

    /// IO error reading config.
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error during file watching.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize watcher.
    #[error("Failed to initialize file watcher: {0}")]
    Init(String),
}

impl ConfigError {
    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(json: &str) -> LintReport {
        schemabox_codegen::lint(&schemabox_codegen::Schema::from_json(json).unwrap())
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::OutOfDate("stale".into()).exit_code(), 2);
        let err = CliError::Lint {
            report: LintReport::default(),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_messages() {
        let err = CliError::from(ConfigError::not_found("schemabox.toml"));
        assert_eq!(
            err.to_string(),
            "Failed to load configuration: Configuration file not found: schemabox.toml"
        );

        let err = CliError::Lint {
            report: report(
                r#"{
                    "objects": [
                        { "title": "Empty" },
                        { "title": "Post", "fields": [
                            { "key": "author", "ref": "User" },
                            { "key": "media", "ref": "Media" }
                        ] }
                    ]
                }"#,
            ),
        };
        assert_eq!(
            err.to_string(),
            "Schema failed lint with 2 error(s) and 1 warning(s)"
        );
    }
}
