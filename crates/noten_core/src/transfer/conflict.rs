//! Identifier collision handling for imported projects.

use crate::model::project::{EntityId, Project};
use uuid::Uuid;

const IMPORTED_SUFFIX: &str = " (Imported)";
const IMPORTED_FALLBACK_NAME: &str = "Imported Project";

/// Caller's choice when an imported project collides with an existing id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Replace the existing project in place, keeping its position.
    Replace,
    /// Keep both: the import gets a fresh id and a marked name.
    KeepBoth,
}

/// Position of an existing project sharing `incoming`'s id.
pub fn find_conflict(projects: &[Project], incoming: &Project) -> Option<usize> {
    projects.iter().position(|project| project.id == incoming.id)
}

/// Inserts `incoming` into `projects` according to `resolution`.
///
/// Without a collision the project is appended unchanged regardless of
/// `resolution`. Returns the id the project ends up with.
pub fn apply_import(
    projects: &mut Vec<Project>,
    mut incoming: Project,
    resolution: ConflictResolution,
) -> EntityId {
    let Some(index) = find_conflict(projects, &incoming) else {
        let id = incoming.id;
        projects.push(incoming);
        return id;
    };

    match resolution {
        ConflictResolution::Replace => {
            let id = incoming.id;
            projects[index] = incoming;
            id
        }
        ConflictResolution::KeepBoth => {
            incoming.id = Uuid::new_v4();
            incoming.name = if incoming.name.trim().is_empty() {
                IMPORTED_FALLBACK_NAME.to_string()
            } else {
                format!("{}{IMPORTED_SUFFIX}", incoming.name)
            };
            let id = incoming.id;
            projects.push(incoming);
            id
        }
    }
}
