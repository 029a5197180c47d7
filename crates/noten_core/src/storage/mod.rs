//! JSON document storage with atomic replace semantics.
//!
//! # Responsibility
//! - Load-or-create typed documents from disk.
//! - Persist documents through a temp-file-then-rename commit.
//!
//! # Invariants
//! - A destination file is either its previous complete content or the new
//!   complete content; partial writes are never observable.
//! - Writers to the same path are not coordinated here. Callers keep a single
//!   active writer per document.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod atomic;

pub use atomic::{load_or_create, write_atomic};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    /// Filesystem failure (permissions, disk full, rename failure).
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Value could not be encoded as JSON.
    Serialize(serde_json::Error),
    /// File exists but is not valid JSON for the expected shape.
    Deserialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is the recoverable "file is malformed" case.
    pub fn is_deserialize(&self) -> bool {
        matches!(self, Self::Deserialize { .. })
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o failure at `{}`: {source}", path.display()),
            Self::Serialize(err) => write!(f, "failed to encode document: {err}"),
            Self::Deserialize { path, source } => {
                write!(f, "malformed document `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Deserialize { source, .. } => Some(source),
        }
    }
}
