//! Core project data engine for Noten.
//!
//! Durable JSON storage with atomic writes, single-project import/export,
//! recurrence expansion, the visible schedule and in-project search. UI
//! hosts drive it through [`ProjectService`] or the pure functions directly.

pub mod hotkey;
pub mod logging;
pub mod model;
pub mod paths;
pub mod repo;
pub mod schedule;
pub mod search;
pub mod service;
pub mod storage;
pub mod transfer;

pub use hotkey::{parse_hotkey, HotkeyBinding, HotkeyModifiers};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{
    AppData, EntityId, Project, Recurrence, ScheduleEntry, TodoItem, TodoList, ValidationError,
};
pub use model::settings::{AppSettings, ThemeMode};
pub use repo::project_repo::{JsonProjectRepository, ProjectRepository};
pub use repo::settings_repo::{JsonSettingsRepository, SettingsRepository};
pub use schedule::recurrence::expand_occurrences;
pub use schedule::view::{filter_and_sort, ScheduleScope};
pub use search::project_search::{search, SearchHit, SearchSource};
pub use service::project_service::{ImportOutcome, ProjectService, ServiceError};
pub use storage::{load_or_create, write_atomic, StorageError, StorageResult};
pub use transfer::{
    export_project, import_project, ConflictResolution, ImportedProject, TransferError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
