//! Error types for the edges of the converter
//!
//! The conversion itself never fails: unknown tags pass through and unknown
//! classes are annotated. Errors only come from loading configuration and
//! reading or writing files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported config format '{0}' (expected toml, json, yaml or yml)")]
    UnsupportedFormat(String),
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unknown vocabulary '{0}' (expected tailwind or bootstrap)")]
    UnknownVocabulary(String),
    #[error("Class '{class}' in table '{table}': property '{property}' must be a number or a string")]
    InvalidStyleValue {
        table: String,
        class: String,
        property: String,
    },
    #[error("Rule '{name}' has an invalid pattern: {source}")]
    InvalidRule {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while converting files on disk
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported file type: {0} (expected .jsx or .tsx)")]
    Unsupported(PathBuf),
}
