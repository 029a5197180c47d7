//! Application state service for the desktop host.
//!
//! # Responsibility
//! - Hold the loaded `AppData` and the active project selection.
//! - Provide project/list/schedule mutations with debounced persistence.
//! - Route import/export, schedule view and search through the active project.
//!
//! # Invariants
//! - `AppData::projects` is never empty and `active_project_id` always names
//!   one of its projects.
//! - Every mutation stamps the live document and submits a snapshot of it to
//!   the debounced saver; only the last snapshot of a burst is written, so the
//!   file always matches the live timestamps.
//! - The saver worker is the only writer while a snapshot is pending;
//!   `save_now` discards the pending snapshot before writing.
//! - Renames and duplicates never commit a blank project name.

use crate::model::project::{
    AppData, EntityId, Project, ScheduleEntry, TodoItem, TodoList, ValidationError,
    DEFAULT_PROJECT_NAME,
};
use crate::repo::project_repo::ProjectRepository;
use crate::schedule::view::{filter_and_sort, ScheduleScope};
use crate::search::project_search::{search, SearchHit};
use crate::service::debounce::Debouncer;
use crate::storage::StorageError;
use crate::transfer::{
    apply_import, export_project, find_conflict, import_project, ConflictResolution, TransferError,
};
use chrono::{NaiveDate, Utc};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

/// Quiet period between the last mutation and the debounced save.
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(400);

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for application state use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input violates a project invariant.
    Validation(ValidationError),
    /// Target project does not exist.
    ProjectNotFound(EntityId),
    /// Target list does not exist in the active project.
    ListNotFound(EntityId),
    /// Deleting would leave the document without projects.
    LastProject,
    Storage(StorageError),
    Transfer(TransferError),
    /// Save worker thread could not be started.
    SaverUnavailable(std::io::Error),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::LastProject => write!(f, "cannot delete the only remaining project"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
            Self::SaverUnavailable(err) => write!(f, "failed to start save worker: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Transfer(err) => Some(err),
            Self::SaverUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<TransferError> for ServiceError {
    fn from(value: TransferError) -> Self {
        match value {
            TransferError::Validation(err) => Self::Validation(err),
            other => Self::Transfer(other),
        }
    }
}

/// Result of importing a project file.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// No collision; the project was appended and made active.
    Added(EntityId),
    /// A project with the same id exists. Resolve with
    /// [`ProjectService::resolve_import_conflict`].
    Conflict(Box<Project>),
}

/// Host-owned application state.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
    data: AppData,
    saver: Debouncer<AppData>,
}

impl<R> ProjectService<R>
where
    R: ProjectRepository + Clone + Send + 'static,
{
    /// Loads the document and starts the debounced saver.
    ///
    /// An empty document gains a default project; an unknown active id falls
    /// back to the first project.
    pub fn open(repo: R, save_delay: Duration) -> ServiceResult<Self> {
        let mut data = repo.load()?;
        if data.projects.is_empty() {
            data.projects.push(Project::new(DEFAULT_PROJECT_NAME));
        }
        if data.project(data.active_project_id).is_none() {
            data.active_project_id = data.projects[0].id;
        }

        let sink_repo = repo.clone();
        let saver = Debouncer::new(save_delay, move |snapshot: AppData| {
            if let Err(err) = sink_repo.persist(&snapshot) {
                error!(
                    "event=appdata_save module=service status=error mode=debounced error={}",
                    err
                );
            }
        })
        .map_err(ServiceError::SaverUnavailable)?;

        info!(
            "event=service_open module=service status=ok projects={}",
            data.projects.len()
        );
        Ok(Self { repo, data, saver })
    }
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn projects(&self) -> &[Project] {
        &self.data.projects
    }

    pub fn active_project_id(&self) -> EntityId {
        self.data.active_project_id
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.data.project(self.data.active_project_id)
    }

    pub fn set_active(&mut self, id: EntityId) -> ServiceResult<()> {
        if self.data.project(id).is_none() {
            return Err(ServiceError::ProjectNotFound(id));
        }
        self.data.active_project_id = id;
        self.schedule_save();
        Ok(())
    }

    /// Appends `Project N` and makes it active.
    pub fn add_project(&mut self) -> EntityId {
        let project = Project::new(format!("Project {}", self.data.projects.len() + 1));
        self.push_active(project)
    }

    pub fn rename_active(&mut self, name: &str) -> ServiceResult<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyProjectName.into());
        }
        self.update_active(|project| project.name = trimmed.to_string())
    }

    /// Deep-copies the active project as `<name> Copy` and activates it.
    pub fn duplicate_active(&mut self) -> ServiceResult<EntityId> {
        let source = self.require_active()?;
        let copy = source.duplicate(format!("{} Copy", source.name));
        copy.validate()?;
        Ok(self.push_active(copy))
    }

    /// Removes the active project; the first remaining one becomes active.
    pub fn delete_active(&mut self) -> ServiceResult<EntityId> {
        if self.data.projects.len() <= 1 {
            return Err(ServiceError::LastProject);
        }
        let id = self.data.active_project_id;
        let index = self
            .data
            .project_index(id)
            .ok_or(ServiceError::ProjectNotFound(id))?;
        self.data.projects.remove(index);
        self.data.active_project_id = self.data.projects[0].id;
        self.schedule_save();
        Ok(id)
    }

    /// Applies an arbitrary edit to the active project and schedules a save.
    pub fn update_active<F, T>(&mut self, edit: F) -> ServiceResult<T>
    where
        F: FnOnce(&mut Project) -> T,
    {
        let id = self.data.active_project_id;
        let project = self
            .data
            .project_mut(id)
            .ok_or(ServiceError::ProjectNotFound(id))?;
        let output = edit(project);
        self.schedule_save();
        Ok(output)
    }

    pub fn set_notes(&mut self, notes_blob: impl Into<String>) -> ServiceResult<()> {
        let notes_blob = notes_blob.into();
        self.update_active(|project| project.notes_rtf = notes_blob)
    }

    /// Appends `List N` to the active project.
    pub fn add_list(&mut self) -> ServiceResult<EntityId> {
        self.update_active(|project| {
            let list = TodoList::new(format!("List {}", project.lists.len() + 1));
            let id = list.id;
            project.lists.push(list);
            id
        })
    }

    pub fn add_todo_item(&mut self, list_id: EntityId) -> ServiceResult<EntityId> {
        let list_exists = self
            .active_project()
            .is_some_and(|project| project.list(list_id).is_some());
        if !list_exists {
            return Err(ServiceError::ListNotFound(list_id));
        }
        self.update_active(|project| {
            let item = TodoItem::new("New item");
            let id = item.id;
            if let Some(list) = project.list_mut(list_id) {
                list.items.push(item);
            }
            id
        })
    }

    pub fn add_schedule_entry(&mut self, date: NaiveDate) -> ServiceResult<EntityId> {
        self.update_active(|project| {
            let entry = ScheduleEntry::new("New entry", date);
            let id = entry.id;
            project.schedule_entries.push(entry);
            id
        })
    }

    /// Imports a project file, appending it unless its id collides.
    pub fn import_from(&mut self, path: impl AsRef<Path>) -> ServiceResult<ImportOutcome> {
        let imported = import_project(path)?;
        if find_conflict(&self.data.projects, &imported.project).is_some() {
            info!(
                "event=project_import module=service status=conflict project_id={}",
                imported.project.id
            );
            return Ok(ImportOutcome::Conflict(Box::new(imported.project)));
        }
        Ok(ImportOutcome::Added(self.push_active(imported.project)))
    }

    /// Commits a previously conflicting import and activates it.
    pub fn resolve_import_conflict(
        &mut self,
        project: Project,
        resolution: ConflictResolution,
    ) -> EntityId {
        let id = apply_import(&mut self.data.projects, project, resolution);
        self.data.active_project_id = id;
        self.schedule_save();
        id
    }

    pub fn export_active(&self, path: impl AsRef<Path>) -> ServiceResult<()> {
        let project = self.require_active()?;
        export_project(project, path)?;
        Ok(())
    }

    /// Visible schedule of the active project.
    pub fn visible_schedule(&self, scope: ScheduleScope, today: NaiveDate) -> Vec<ScheduleEntry> {
        self.active_project()
            .map(|project| filter_and_sort(&project.schedule_entries, scope, today))
            .unwrap_or_default()
    }

    pub fn search(&self, query: &str, max_results: usize) -> Vec<SearchHit> {
        search(self.active_project(), query, max_results)
    }

    /// Writes the document synchronously, stamping the live timestamps.
    ///
    /// Any pending debounced snapshot is dropped first; it is older than the
    /// state written here.
    pub fn save_now(&mut self) -> ServiceResult<()> {
        self.saver.cancel();
        self.repo.save(&mut self.data)?;
        Ok(())
    }

    /// Writes any pending debounced snapshot and waits for it.
    pub fn flush(&self) {
        self.saver.flush();
    }

    fn require_active(&self) -> ServiceResult<&Project> {
        let id = self.data.active_project_id;
        self.data
            .project(id)
            .ok_or(ServiceError::ProjectNotFound(id))
    }

    fn push_active(&mut self, project: Project) -> EntityId {
        let id = project.id;
        self.data.projects.push(project);
        self.data.active_project_id = id;
        self.schedule_save();
        id
    }

    fn schedule_save(&mut self) {
        self.data.touch_all(Utc::now());
        self.saver.submit(self.data.clone());
    }
}
