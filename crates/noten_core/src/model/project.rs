//! Project document model.
//!
//! # Responsibility
//! - Define the persisted shape of the application document (`AppData`) and
//!   every entity a project owns (lists, items, schedule entries).
//! - Provide explicit deep-copy routines used by duplicate flows.
//!
//! # Invariants
//! - `Project::id` is immutable once assigned; the nil UUID is never a valid
//!   committed identifier.
//! - A project exclusively owns its lists and schedule entries. Copies never
//!   alias the source collections.
//! - `ScheduleEntry::linked_todo_item_id` is a weak reference: it is never
//!   cascaded, nulled out or validated.
//! - Wire keys are lower camel case; explicit `null`s decode like absent fields.

use super::wire::{calendar_date, null_as_default, optional_calendar_date, timestamp, EnumToken};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for projects, lists, items and schedule entries.
pub type EntityId = Uuid;

/// Current schema version of `appdata.json` and export envelopes.
pub const SCHEMA_VERSION: i64 = 1;

/// Name given to the project created on first run.
pub const DEFAULT_PROJECT_NAME: &str = "Personal";

/// Fallback list name applied by normalization.
pub const DEFAULT_LIST_NAME: &str = "List";

/// Notes blob stored for brand-new projects (an empty formatted document).
pub const EMPTY_NOTES_DOCUMENT: &str =
    "{\\rtf1\\ansi\\deff0 {\\fonttbl {\\f0 Segoe UI;}}\\f0\\fs22 }";

/// Version string written into documents and envelopes.
pub fn app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Rejection reasons for project-level invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Project id is the nil UUID.
    NilProjectId,
    /// Project name is empty after trimming.
    EmptyProjectName,
    /// Envelope or document written with a schema this build cannot read.
    UnsupportedSchemaVersion { found: i64, supported: i64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilProjectId => write!(f, "project id must not be the nil uuid"),
            Self::EmptyProjectName => write!(f, "project name must not be empty"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "unsupported schema version {found}; this build reads version {supported}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Recurrence rule attached to a schedule entry.
///
/// Written as a lower-case name. Decodes from a name or a variant index
/// (`0..=2`); any other token becomes `Unrecognized`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Recurrence {
    /// One-off entry.
    #[default]
    None,
    /// Repeats every day from the anchor date.
    Daily,
    /// Repeats every 7 days from the anchor date.
    Weekly,
    /// Kind written by a newer/foreign writer. Expanded like `Daily`.
    Unrecognized,
}

impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = EnumToken::deserialize(deserializer)?;
        let kind = if token.is(0, "none") {
            Self::None
        } else if token.is(1, "daily") {
            Self::Daily
        } else if token.is(2, "weekly") {
            Self::Weekly
        } else {
            Self::Unrecognized
        };
        Ok(kind)
    }
}

/// Root persisted document (`appdata.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default = "default_schema_version")]
    pub schema_version: i64,
    #[serde(default = "default_app_version", deserialize_with = "null_as_default")]
    pub app_version: String,
    #[serde(default)]
    pub active_project_id: EntityId,
    /// Display order of projects.
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
}

impl AppData {
    /// Builds the first-run document: one "Personal" project, marked active.
    pub fn default_document() -> Self {
        let project = Project::new(DEFAULT_PROJECT_NAME);
        Self {
            schema_version: SCHEMA_VERSION,
            app_version: app_version().to_string(),
            active_project_id: project.id,
            projects: vec![project],
        }
    }

    pub fn project(&self, id: EntityId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn project_mut(&mut self, id: EntityId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|project| project.id == id)
    }

    /// Position of a project in display order.
    pub fn project_index(&self, id: EntityId) -> Option<usize> {
        self.projects.iter().position(|project| project.id == id)
    }

    /// Stamps `updated_at_utc = now` on every project.
    ///
    /// All projects are stamped, not only the mutated one.
    pub fn touch_all(&mut self, now: DateTime<Utc>) {
        for project in &mut self.projects {
            project.updated_at_utc = now;
        }
    }
}

impl Default for AppData {
    fn default() -> Self {
        Self::default_document()
    }
}

/// One user project: notes, todo lists and a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Absent on the wire gets a fresh id; an explicit nil UUID is kept so
    /// validation can reject it.
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default = "Utc::now", deserialize_with = "timestamp")]
    pub created_at_utc: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "timestamp")]
    pub updated_at_utc: DateTime<Utc>,
    /// Opaque formatted text. Core only flattens it for search.
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes_rtf: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lists: Vec<TodoList>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule_entries: Vec<ScheduleEntry>,
}

impl Project {
    /// Creates an empty project with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at_utc: now,
            updated_at_utc: now,
            notes_rtf: EMPTY_NOTES_DOCUMENT.to_string(),
            lists: Vec::new(),
            schedule_entries: Vec::new(),
        }
    }

    /// Deep copy under a new identity.
    ///
    /// Every list, item and entry receives a fresh id. Schedule links that
    /// pointed at items of this project follow the copied items; links to
    /// anything else are kept verbatim.
    pub fn duplicate(&self, name: impl Into<String>) -> Self {
        let mut item_ids: HashMap<EntityId, EntityId> = HashMap::new();
        let lists = self
            .lists
            .iter()
            .map(|list| list.duplicate(&mut item_ids))
            .collect();
        let schedule_entries = self
            .schedule_entries
            .iter()
            .map(|entry| {
                let mut copy = entry.duplicate();
                copy.linked_todo_item_id = entry
                    .linked_todo_item_id
                    .map(|linked| item_ids.get(&linked).copied().unwrap_or(linked));
                copy
            })
            .collect();

        let mut copy = Project::new(name);
        copy.notes_rtf = self.notes_rtf.clone();
        copy.lists = lists;
        copy.schedule_entries = schedule_entries;
        copy
    }

    /// Checks committed-state invariants: non-nil id, non-blank name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilProjectId);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        Ok(())
    }

    pub fn list(&self, id: EntityId) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.id == id)
    }

    pub fn list_mut(&mut self, id: EntityId) -> Option<&mut TodoList> {
        self.lists.iter_mut().find(|list| list.id == id)
    }

    /// Looks up a todo item in any list. Used to resolve weak schedule links.
    pub fn find_item(&self, id: EntityId) -> Option<&TodoItem> {
        self.lists
            .iter()
            .flat_map(|list| list.items.iter())
            .find(|item| item.id == id)
    }
}

/// Named, ordered todo list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    fn duplicate(&self, item_ids: &mut HashMap<EntityId, EntityId>) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| {
                let copy = item.duplicate();
                item_ids.insert(item.id, copy.id);
                copy
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, deserialize_with = "optional_calendar_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

impl TodoItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_completed: false,
            due_date: None,
            priority: 0,
            notes: String::new(),
        }
    }

    fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }
}

/// Calendar entry, optionally recurring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Anchor date; for occurrences, the occurrence date.
    #[serde(default = "today", deserialize_with = "calendar_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    /// Weak reference to a `TodoItem` id; may dangle.
    #[serde(default)]
    pub linked_todo_item_id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recurrence: Recurrence,
    /// Inclusive last date; `None` means "up to the query horizon".
    #[serde(default, deserialize_with = "optional_calendar_date")]
    pub recurrence_until: Option<NaiveDate>,
}

impl ScheduleEntry {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date,
            start_time: None,
            end_time: None,
            notes: String::new(),
            linked_todo_item_id: None,
            recurrence: Recurrence::None,
            recurrence_until: None,
        }
    }

    /// Value copy of this entry moved to `date`. Identity is preserved.
    pub fn occurrence_on(&self, date: NaiveDate) -> Self {
        Self {
            date,
            ..self.clone()
        }
    }

    fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_schema_version() -> i64 {
    SCHEMA_VERSION
}

fn default_app_version() -> String {
    app_version().to_string()
}
