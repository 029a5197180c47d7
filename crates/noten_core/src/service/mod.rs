//! Host-facing application state and save scheduling.
//!
//! # Responsibility
//! - Own the in-memory document and orchestrate repository, import/export,
//!   schedule and search calls into use-case APIs.
//! - Coalesce bursts of mutations into one trailing-edge save.
//!
//! # Invariants
//! - One service instance is the single writer of its document.
//! - The document always holds at least one project and a valid active id.

pub mod debounce;
pub mod project_service;
