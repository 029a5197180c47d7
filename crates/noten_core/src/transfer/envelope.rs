//! Export envelope encoding and import normalization.

use super::{TransferError, TransferResult};
use crate::model::project::{
    app_version, Project, ValidationError, DEFAULT_LIST_NAME, SCHEMA_VERSION,
};
use crate::storage::write_atomic;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Wire wrapper for exactly one exported project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    #[serde(default = "default_envelope_version")]
    pub schema_version: i64,
    #[serde(default, deserialize_with = "crate::model::wire::null_as_default")]
    pub app_version: String,
    pub project: Project,
}

/// Normalized project plus the metadata of the envelope it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedProject {
    pub schema_version: i64,
    pub app_version: String,
    pub project: Project,
}

/// Exports a deep copy of `project` to `path` atomically.
pub fn export_project(project: &Project, path: impl AsRef<Path>) -> TransferResult<()> {
    let path = path.as_ref();
    let envelope = ExportEnvelope {
        schema_version: SCHEMA_VERSION,
        app_version: app_version().to_string(),
        project: project.clone(),
    };
    write_atomic(path, &envelope)?;
    info!(
        "event=project_export module=transfer status=ok project_id={} lists={} entries={}",
        envelope.project.id,
        envelope.project.lists.len(),
        envelope.project.schedule_entries.len()
    );
    Ok(())
}

/// Reads, normalizes and validates an exported project.
///
/// # Errors
/// - `Io` when the file cannot be read.
/// - `EmptyPayload` / `Malformed` when the file is not a usable envelope.
/// - `Validation` for unsupported schema versions, nil ids or blank names.
pub fn import_project(path: impl AsRef<Path>) -> TransferResult<ImportedProject> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| TransferError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if raw.trim().is_empty() {
        return Err(TransferError::EmptyPayload(path.to_path_buf()));
    }

    let envelope = serde_json::from_str::<Option<ExportEnvelope>>(&raw)
        .map_err(|source| TransferError::Malformed {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| TransferError::EmptyPayload(path.to_path_buf()))?;

    if envelope.schema_version != SCHEMA_VERSION {
        warn!(
            "event=project_import module=transfer status=error error_code=unsupported_schema found={}",
            envelope.schema_version
        );
        return Err(ValidationError::UnsupportedSchemaVersion {
            found: envelope.schema_version,
            supported: SCHEMA_VERSION,
        }
        .into());
    }

    let mut project = envelope.project;
    normalize_project(&mut project);
    project.validate()?;

    info!(
        "event=project_import module=transfer status=ok project_id={} lists={} entries={}",
        project.id,
        project.lists.len(),
        project.schedule_entries.len()
    );
    Ok(ImportedProject {
        schema_version: envelope.schema_version,
        app_version: envelope.app_version,
        project,
    })
}

/// Repairs optional data in an imported project.
///
/// Missing collections and strings already decode as empty values; this pass
/// trims list names and replaces blank ones with `"List"`.
pub fn normalize_project(project: &mut Project) {
    for list in &mut project.lists {
        let trimmed = list.name.trim();
        list.name = if trimmed.is_empty() {
            DEFAULT_LIST_NAME.to_string()
        } else {
            trimmed.to_string()
        };
    }
}

fn default_envelope_version() -> i64 {
    SCHEMA_VERSION
}
