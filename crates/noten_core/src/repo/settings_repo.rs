//! Preference repository (`settings.json`). No business rules.

use crate::model::settings::AppSettings;
use crate::storage::{load_or_create, write_atomic, StorageError, StorageResult};
use log::warn;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub trait SettingsRepository {
    fn load(&self) -> StorageResult<AppSettings>;
    fn save(&self, settings: &AppSettings) -> StorageResult<()>;
}

#[derive(Debug, Clone)]
pub struct JsonSettingsRepository {
    path: PathBuf,
}

impl JsonSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(SETTINGS_FILE_NAME))
    }
}

impl SettingsRepository for JsonSettingsRepository {
    fn load(&self) -> StorageResult<AppSettings> {
        match load_or_create(&self.path, AppSettings::default) {
            Err(err) if err.is_deserialize() => {
                warn!(
                    "event=settings_load module=repo status=fallback reason=malformed error={}",
                    err
                );
                Ok(AppSettings::default())
            }
            other => other,
        }
    }

    fn save(&self, settings: &AppSettings) -> StorageResult<()> {
        write_atomic(&self.path, settings)
    }
}
