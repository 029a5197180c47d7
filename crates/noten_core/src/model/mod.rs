//! Persisted domain model for projects and user preferences.
//!
//! # Responsibility
//! - Define the canonical document shapes shared by storage, views and
//!   import/export.
//!
//! # Invariants
//! - Every project-owned entity is identified by a stable `EntityId`.
//! - Entities are owned by exactly one project; copies are deep.

pub mod project;
pub mod settings;
pub(crate) mod wire;
