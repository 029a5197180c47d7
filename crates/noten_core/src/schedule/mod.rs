//! Schedule projections over a project's entries.
//!
//! # Responsibility
//! - Expand recurring entries into concrete dated occurrences.
//! - Produce the filtered, deterministically ordered visible schedule.
//!
//! # Invariants
//! - All functions are pure: no I/O, no mutation of inputs.
//! - Range membership uses calendar dates only; time-of-day is ignored.

pub mod recurrence;
pub mod view;
