//! Project-scoped search.
//!
//! # Invariants
//! - Sources are scanned in fixed order: notes, list items (list order, then
//!   item order), schedule entries (stored order).
//! - Scanning stops as soon as `max_results` hits exist; later sources are
//!   never visited once the cap is reached.
//! - Queries are trimmed; blank queries return no hits.

use super::text::{contains_ignore_case, flatten_notes, snippet};
use crate::model::project::Project;
use log::debug;

/// Default cap used by interactive search.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Where a hit was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
    Notes,
    ListItem,
    Schedule,
}

/// One labelled search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub source: SearchSource,
    /// Display label, e.g. `Notes`, `List: Groceries`, `Schedule: 2026-05-01`.
    pub title: String,
    pub snippet: String,
}

/// Searches `project` for `query`, returning at most `max_results` hits.
///
/// Returns an empty list when `project` is `None`, the trimmed query is
/// empty, or `max_results == 0`.
pub fn search(project: Option<&Project>, query: &str, max_results: usize) -> Vec<SearchHit> {
    let Some(project) = project else {
        return Vec::new();
    };
    let query = query.trim();
    if query.is_empty() || max_results == 0 {
        return Vec::new();
    }

    let mut collector = HitCollector::new(max_results);
    scan(project, query, &mut collector);

    debug!(
        "event=project_search module=search status=ok query_len={} hits={} capped={}",
        query.chars().count(),
        collector.hits.len(),
        collector.is_full()
    );
    collector.hits
}

fn scan(project: &Project, query: &str, collector: &mut HitCollector) {
    let notes = flatten_notes(&project.notes_rtf);
    if contains_ignore_case(&notes, query)
        && collector.push(SearchSource::Notes, "Notes".to_string(), snippet(&notes, query))
    {
        return;
    }

    for list in &project.lists {
        for item in &list.items {
            let haystack = format!("{} {}", item.title, item.notes);
            if !contains_ignore_case(&haystack, query) {
                continue;
            }
            let label = format!("List: {}", list.name);
            if collector.push(SearchSource::ListItem, label, snippet(&haystack, query)) {
                return;
            }
        }
    }

    for entry in &project.schedule_entries {
        let haystack = format!("{} {}", entry.title, entry.notes);
        if !contains_ignore_case(&haystack, query) {
            continue;
        }
        let label = format!("Schedule: {}", entry.date.format("%Y-%m-%d"));
        if collector.push(SearchSource::Schedule, label, snippet(&haystack, query)) {
            return;
        }
    }
}

struct HitCollector {
    hits: Vec<SearchHit>,
    cap: usize,
}

impl HitCollector {
    fn new(cap: usize) -> Self {
        Self {
            hits: Vec::with_capacity(cap.min(DEFAULT_MAX_RESULTS)),
            cap,
        }
    }

    /// Records a hit; returns `true` once the cap has been reached.
    fn push(&mut self, source: SearchSource, title: String, snippet: String) -> bool {
        self.hits.push(SearchHit {
            source,
            title,
            snippet,
        });
        self.is_full()
    }

    fn is_full(&self) -> bool {
        self.hits.len() >= self.cap
    }
}
