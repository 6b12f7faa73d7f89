//! Error types for metadata extraction
//!
//! Extraction itself never fails on a loaded store; these errors come from
//! the layers around it (loading, parsing, serialization, argument checks).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to load RDF from {path}: {reason}")]
    LoadError { path: String, reason: String },

    #[error("Failed to parse RDF from {source_name}: {reason}")]
    ParseError { source_name: String, reason: String },

    #[error("Unsupported RDF format '{0}'")]
    UnsupportedFormat(String),

    #[error("Invalid base IRI '{0}'")]
    InvalidBaseIri(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
}
