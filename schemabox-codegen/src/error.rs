//! Error types for schema loading and code generation.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A validator spec that does not map onto a runtime validator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidatorSpecError {
    #[error("unknown validator `{0}`")]
    UnknownName(String),

    #[error("`{name}` takes {expected} argument(s), found {found}")]
    Arity {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("`{name}` argument must be {expected}")]
    Argument {
        name: &'static str,
        expected: &'static str,
    },
}

/// Failure to generate code.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid validator on `{owner}`: {source}")]
    Validator {
        owner: String,
        #[source]
        source: ValidatorSpecError,
    },

    #[error("`{name}` is not a usable identifier")]
    Identifier { name: String },

    #[error("generated code does not parse: {0}")]
    Syntax(#[from] syn::Error),
}

impl GenerateError {
    pub fn validator(owner: impl Into<String>, source: ValidatorSpecError) -> Self {
        Self::Validator {
            owner: owner.into(),
            source,
        }
    }
}
