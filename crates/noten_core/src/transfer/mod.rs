//! Single-project import/export.
//!
//! # Responsibility
//! - Write one project into a self-describing envelope file.
//! - Parse, normalize and validate an envelope read back from disk.
//! - Apply caller-chosen resolutions for identifier collisions.
//!
//! # Invariants
//! - Only envelope schema version 1 is accepted; there is no migration.
//! - Normalization repairs missing optional data and never rejects.
//! - A collision is a result for the caller to resolve, not an error.

use crate::model::project::ValidationError;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod conflict;
pub mod envelope;

pub use conflict::{apply_import, find_conflict, ConflictResolution};
pub use envelope::{
    export_project, import_project, normalize_project, ExportEnvelope, ImportedProject,
};

pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug)]
pub enum TransferError {
    /// Import file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Import file is empty or decodes to JSON `null`.
    EmptyPayload(PathBuf),
    /// Import file is not a valid envelope.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Envelope parsed but violates project or schema rules.
    Validation(ValidationError),
    /// Export write failed.
    Storage(StorageError),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read import file `{}`: {source}", path.display())
            }
            Self::EmptyPayload(path) => {
                write!(f, "import failed: `{}` is empty or invalid", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "import failed: `{}` is not a project export: {source}", path.display())
            }
            Self::Validation(err) => write!(f, "import rejected: {err}"),
            Self::Storage(err) => write!(f, "export failed: {err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::EmptyPayload(_) => None,
            Self::Malformed { source, .. } => Some(source),
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for TransferError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for TransferError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
