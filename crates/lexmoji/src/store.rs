//! JSON persistence for every document the pipeline reads or writes.
//!
//! Writes are atomic: the document is serialized into a temporary file next to
//! the destination and renamed over it, so readers (and resumed runs) only
//! ever see the previous or the new committed version.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{LoadError, StoreError};

/// A durable commit point for a document of type `T`.
///
/// Long-running stages call [`Checkpoint::save`] after every unit of work so
/// that an interrupted run resumes from the last committed state.
pub trait Checkpoint<T: ?Sized> {
    fn save(&mut self, document: &T) -> Result<(), StoreError>;
}

/// Commits documents to a JSON file with [`write_json_atomic`].
#[derive(Clone, Debug)]
pub struct JsonCheckpoint {
    path: PathBuf,
}

impl JsonCheckpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + ?Sized> Checkpoint<T> for JsonCheckpoint {
    fn save(&mut self, document: &T) -> Result<(), StoreError> {
        write_json_atomic(&self.path, document)
    }
}

/// Discards every commit. Used when a run has no backing file.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCheckpoint;

impl<T: ?Sized> Checkpoint<T> for NoCheckpoint {
    fn save(&mut self, _document: &T) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Serializes `document` as pretty JSON and atomically replaces `path`.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, document: &T) -> Result<(), StoreError> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::create_dir_all(parent_dir).map_err(io_error)?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(io_error)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        serde_json::to_writer_pretty(&mut writer, document).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.write_all(b"\n").map_err(io_error)?;
        writer.flush().map_err(io_error)?;
    }

    temp_file.persist(path).map_err(|source| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "committed document");
    Ok(())
}

/// Reads and deserializes a whole JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| json_error(path, &e))
}

/// Like [`read_json`], but a missing file yields `T::default()`.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, LoadError> {
    match read_json(path) {
        Err(e) if e.is_not_found() => {
            debug!(path = %path.display(), "no existing document, starting empty");
            Ok(T::default())
        }
        other => other,
    }
}

/// Records read from a JSON array, tolerating malformed elements.
#[derive(Debug)]
pub struct Records<T> {
    pub items: Vec<T>,
    /// Number of elements that failed to deserialize and were skipped.
    pub skipped: usize,
}

/// Reads a JSON array, deserializing each element on its own.
///
/// An element that does not deserialize is skipped and counted rather than
/// failing the whole document. A document that is not an array fails.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Records<T>, LoadError> {
    let Value::Array(elements) = read_json::<Value>(path)? else {
        return Err(LoadError::Shape {
            path: path.to_path_buf(),
            expected: "array",
        });
    };

    let mut items = Vec::with_capacity(elements.len());
    let mut skipped = 0;
    for (position, element) in elements.into_iter().enumerate() {
        match serde_json::from_value(element) {
            Ok(item) => items.push(item),
            Err(e) => {
                debug!(path = %path.display(), position, error = %e, "skipping malformed record");
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        warn!(path = %path.display(), skipped, "skipped malformed records");
    }
    Ok(Records { items, skipped })
}

fn json_error(path: &Path, err: &serde_json::Error) -> LoadError {
    LoadError::Json {
        path: path.to_path_buf(),
        line: err.line(),
        column: err.column(),
        message: err.to_string(),
    }
}
