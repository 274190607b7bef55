//! Error types for content validation, loading and configuration.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use thiserror::Error;

/// Why a metadata field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    MissingField,
    WrongType,
    InvalidDate,
}

impl Display for SchemaErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let desc = match self {
            SchemaErrorKind::MissingField => "missing field",
            SchemaErrorKind::WrongType => "wrong type",
            SchemaErrorKind::InvalidDate => "invalid date",
        };
        write!(f, "{}", desc)
    }
}

/// A metadata mapping that does not match the blog post shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {kind}")]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub field: &'static str,
}

impl SchemaError {
    pub fn missing(field: &'static str) -> Self {
        Self { kind: SchemaErrorKind::MissingField, field }
    }

    pub fn wrong_type(field: &'static str) -> Self {
        Self { kind: SchemaErrorKind::WrongType, field }
    }

    pub fn invalid_date(field: &'static str) -> Self {
        Self { kind: SchemaErrorKind::InvalidDate, field }
    }
}

/// Errors raised while reading content files.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Front matter error in {path}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("Invalid metadata in {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("Invalid source pattern {pattern}: {message}")]
    Pattern { pattern: String, message: String },
}

impl ContentError {
    pub fn front_matter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FrontMatter {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn pattern(pattern: impl Into<String>, message: impl ToString) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }
}

/// Errors raised while reading or checking the site configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error opening configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
