//! Error types for loading inputs and committing outputs.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that occur while loading a required input document.
///
/// These are the only failures that abort a run: without the lexicon or the
/// emoji catalog there is nothing to resolve.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading an input file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not valid JSON, with file location context.
    #[error("{path}:{line}:{column}: {message}")]
    Json {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The document parsed but has the wrong top-level shape.
    #[error("'{path}' must contain a JSON {expected}")]
    Shape {
        path: PathBuf,
        expected: &'static str,
    },
}

impl LoadError {
    /// Path of the document that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Json { path, .. }
            | LoadError::Shape { path, .. } => path.as_path(),
        }
    }

    /// Returns true when the input file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::Io { source, .. } if source.kind() == ErrorKind::NotFound)
    }
}

/// Errors that occur while committing a document to durable storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not create the target directory or the temporary file.
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serialization failed.
    #[error("failed to serialize '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The temporary file could not be renamed over the destination.
    #[error("failed to replace '{path}': {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}
