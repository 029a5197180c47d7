//! In-memory search over a single project.
//!
//! # Responsibility
//! - Case-insensitive substring search across notes, list items and
//!   schedule entries.
//! - Shape hits into labelled, bounded snippets.

pub mod project_search;
pub mod text;
