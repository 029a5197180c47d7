//! Application document repository (`appdata.json`).
//!
//! # Invariants
//! - Every save stamps `updated_at_utc = now` on all projects.
//! - A missing file is created with one "Personal" project marked active.

use crate::model::project::AppData;
use crate::storage::{load_or_create, write_atomic, StorageError, StorageResult};
use chrono::Utc;
use log::warn;
use std::path::{Path, PathBuf};

/// File name of the application document inside the data directory.
pub const APP_DATA_FILE_NAME: &str = "appdata.json";

/// Repository interface for the whole-document load/save cycle.
pub trait ProjectRepository {
    fn load(&self) -> StorageResult<AppData>;

    /// Writes `data` exactly as given. Callers own timestamp stamping.
    fn persist(&self, data: &AppData) -> StorageResult<()>;

    /// Stamps every project with the current time, then persists.
    fn save(&self, data: &mut AppData) -> StorageResult<()> {
        data.touch_all(Utc::now());
        self.persist(data)
    }
}

/// JSON-file backed project repository.
#[derive(Debug, Clone)]
pub struct JsonProjectRepository {
    path: PathBuf,
}

impl JsonProjectRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository for `<data_dir>/appdata.json`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(APP_DATA_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectRepository for JsonProjectRepository {
    fn load(&self) -> StorageResult<AppData> {
        match load_or_create(&self.path, AppData::default_document) {
            Ok(data) => Ok(data),
            Err(err @ StorageError::Deserialize { .. }) => {
                warn!(
                    "event=appdata_load module=repo status=fallback reason=malformed error={}",
                    err
                );
                Ok(AppData::default_document())
            }
            Err(err) => Err(err),
        }
    }

    fn persist(&self, data: &AppData) -> StorageResult<()> {
        write_atomic(&self.path, data)
    }
}
