//! File-backed supplier stores.
//!
//! # Responsibility
//! - Provide `SupplierStore` adapters over JSON and YAML documents.
//! - Share the read/decode and atomic-write plumbing between formats.
//!
//! # Invariants
//! - A missing, empty or unparsable document, or one whose top level is not
//!   a sequence, reads as an empty set; the next write replaces it.
//! - Inside a sequence, an element that is not a complete record or fails
//!   entity validation is a fatal read error.
//! - Writes go to a sibling temp file that is renamed over the target, so
//!   readers never observe a partially written document.

use crate::model::supplier::{Supplier, SupplierRecord};
use crate::repo::supplier_repo::{RepoError, RepoResult};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

mod json_store;
mod yaml_store;

pub use json_store::JsonFileStore;
pub use yaml_store::YamlFileStore;

/// Errors raised by file-backed stores.
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    /// The path does not carry an extension the store accepts.
    UnsupportedExtension(PathBuf),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "json encoding failed: {err}"),
            Self::Yaml(err) => write!(f, "yaml encoding failed: {err}"),
            Self::UnsupportedExtension(path) => {
                write!(f, "unsupported store file extension: `{}`", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Yaml(err) => Some(err),
            Self::UnsupportedExtension(_) => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for StoreError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

/// Reads the raw document, or `None` when it does not exist yet.
fn read_document(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads a document in two stages: `parse_document` splits it into raw
/// elements, `decode_record` turns each element into a record.
///
/// Only a missing, blank or unparsable document (or one that is not a
/// sequence) degrades to an empty set. Once the document has parsed as a
/// sequence, any element that fails to decode or validate is
/// `RepoError::InvalidData`.
fn load_records<V, E: Display, F: Display>(
    path: &Path,
    format: &'static str,
    parse_document: impl FnOnce(&[u8]) -> Result<Vec<V>, E>,
    decode_record: impl Fn(V) -> Result<SupplierRecord, F>,
) -> RepoResult<Vec<Supplier>> {
    let Some(bytes) = read_document(path)? else {
        return Ok(Vec::new());
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let elements = match parse_document(&bytes) {
        Ok(elements) => elements,
        Err(err) => {
            warn!(
                "event=store_read module=store status=fallback format={} reason=unparsable error={}",
                format, err
            );
            return Ok(Vec::new());
        }
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let record = decode_record(element).map_err(|err| invalid_record(index, path, err))?;
            Supplier::new(record).map_err(|err| invalid_record(index, path, err))
        })
        .collect()
}

fn invalid_record(index: usize, path: &Path, err: impl Display) -> RepoError {
    RepoError::InvalidData(format!(
        "record #{index} in `{}`: {err}",
        path.display()
    ))
}

/// Replaces `path` with `bytes` through a temp file in the same directory.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_error)?;
    let mut temp = NamedTempFile::new_in(dir).map_err(io_error)?;
    temp.write_all(bytes).map_err(io_error)?;
    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}
