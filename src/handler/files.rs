//! Filesystem access for the `/files/*` routes.
//!
//! All access goes through a [`FileStore`] holding the optional base
//! directory. Requested paths are resolved against the base with lexical
//! `.`/`..` normalization and a containment check; a resolved path that
//! leaves the base directory is Forbidden. Unexpected I/O failures are
//! folded into Forbidden rather than surfaced as distinct categories.

use std::path::{Component, Path, PathBuf};

use crate::http::status::HttpStatus;

#[derive(Debug, PartialEq, Eq)]
pub enum FileError {
    /// No base directory configured, path escape, or an I/O failure.
    Forbidden,
    /// The resolved file does not exist.
    NotFound,
}

impl FileError {
    pub fn into_http_status(self) -> HttpStatus {
        match self {
            FileError::Forbidden => HttpStatus::Forbidden,
            FileError::NotFound => HttpStatus::NotFound,
        }
    }
}

pub struct FileStore {
    base: Option<PathBuf>,
}

impl FileStore {
    /// `base` should already be canonicalized; `None` makes every file
    /// route Forbidden.
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Joins the requested relative path onto the base directory and checks
    /// containment after normalization. The base itself is a valid
    /// resolution (empty captures land there and fail at the read instead).
    pub fn resolve(&self, rel: &str) -> Result<PathBuf, FileError> {
        let base = self.base.as_ref().ok_or(FileError::Forbidden)?;
        let resolved = normalize(&base.join(rel));
        if resolved.starts_with(base) {
            Ok(resolved)
        } else {
            Err(FileError::Forbidden)
        }
    }

    pub fn read(&self, rel: &str) -> Result<Vec<u8>, FileError> {
        let path = self.resolve(rel)?;
        if !path.exists() {
            return Err(FileError::NotFound);
        }
        std::fs::read(&path).map_err(|_| FileError::Forbidden)
    }

    /// Writes the body to the resolved path, overwriting any existing file.
    pub fn write(&self, rel: &str, bytes: &[u8]) -> Result<(), FileError> {
        let path = self.resolve(rel)?;
        std::fs::write(&path, bytes).map_err(|_| FileError::Forbidden)
    }
}

/// Lexically removes `.` and `..` segments without touching the filesystem.
/// `..` at the root is absorbed, so escapes surface as a failed prefix
/// check in [`FileStore::resolve`] rather than a panic.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
