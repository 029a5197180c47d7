//! Visible schedule: expansion window, scope filter and ordering.

use super::recurrence::expand_occurrences;
use crate::model::project::ScheduleEntry;
use chrono::{Days, Months, NaiveDate, NaiveTime};
use std::cmp::Ordering;

/// Months of look-ahead expanded past the reference date.
pub const LOOKAHEAD_MONTHS: u32 = 6;

/// Time-window filter for the schedule view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScheduleScope {
    /// Occurrences on the reference date only.
    Today,
    /// Occurrences on or after the reference date.
    #[default]
    Upcoming,
    /// Everything inside the expansion window.
    All,
}

/// Expands `entries` over `[reference - 1 day, reference + 6 months]`, keeps
/// the occurrences matching `scope`, and orders them.
///
/// Ordering: date ascending, then start time ascending with untimed entries
/// last, then title case-insensitively. The sort is stable for equal keys.
pub fn filter_and_sort<'a, I>(
    entries: I,
    scope: ScheduleScope,
    reference: NaiveDate,
) -> Vec<ScheduleEntry>
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    let from = reference.checked_sub_days(Days::new(1)).unwrap_or(reference);
    let to = reference
        .checked_add_months(Months::new(LOOKAHEAD_MONTHS))
        .unwrap_or(NaiveDate::MAX);

    let mut visible: Vec<ScheduleEntry> = expand_occurrences(entries, from, to)
        .into_iter()
        .filter(|occurrence| match scope {
            ScheduleScope::Today => occurrence.date == reference,
            ScheduleScope::Upcoming => occurrence.date >= reference,
            ScheduleScope::All => true,
        })
        .collect();

    visible.sort_by(compare_occurrences);
    visible
}

fn compare_occurrences(left: &ScheduleEntry, right: &ScheduleEntry) -> Ordering {
    left.date
        .cmp(&right.date)
        .then_with(|| compare_start(left.start_time, right.start_time))
        .then_with(|| compare_titles(&left.title, &right.title))
}

fn compare_start(left: Option<NaiveTime>, right: Option<NaiveTime>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// Folds to upper case, so `[`, `_` and the like sort after letters.
fn compare_titles(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_uppercase)
        .cmp(right.chars().flat_map(char::to_uppercase))
}

#[cfg(test)]
mod tests {
    use super::compare_titles;
    use std::cmp::Ordering;

    #[test]
    fn title_comparison_ignores_case() {
        assert_eq!(compare_titles("alpha", "ALPHA"), Ordering::Equal);
        assert_eq!(compare_titles("Beta", "alpha"), Ordering::Greater);
    }

    #[test]
    fn punctuation_between_cases_sorts_after_letters() {
        assert_eq!(compare_titles("_draft", "zeta"), Ordering::Greater);
        assert_eq!(compare_titles("[x]", "Alpha"), Ordering::Greater);
    }
}
