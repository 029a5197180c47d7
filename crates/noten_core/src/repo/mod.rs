//! Document repositories on top of the atomic JSON store.
//!
//! # Responsibility
//! - Define load/save contracts for the application document and settings.
//! - Keep file naming and fallback policy out of service code.
//!
//! # Invariants
//! - `load` never fails because a document is malformed; it falls back to a
//!   fresh default instead. I/O failures still propagate.

pub mod project_repo;
pub mod settings_repo;
