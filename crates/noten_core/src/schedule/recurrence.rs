//! Recurrence expansion.

use crate::model::project::{Recurrence, ScheduleEntry};
use chrono::{Days, NaiveDate};

/// Expands `entries` into occurrences dated within `[from, to]` (inclusive).
///
/// Output follows input order; each entry contributes its occurrences in
/// ascending date order. Occurrences are value copies of their template with
/// only `date` replaced.
pub fn expand_occurrences<'a, I>(entries: I, from: NaiveDate, to: NaiveDate) -> Vec<ScheduleEntry>
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    let mut occurrences = Vec::new();

    for entry in entries {
        let step = match entry.recurrence {
            Recurrence::None => {
                if entry.date >= from && entry.date <= to {
                    occurrences.push(entry.occurrence_on(entry.date));
                }
                continue;
            }
            Recurrence::Weekly => Days::new(7),
            // Unrecognized kinds fall back to daily stepping.
            Recurrence::Daily | Recurrence::Unrecognized => Days::new(1),
        };

        let until = entry.recurrence_until.unwrap_or(to);
        let mut cursor = entry.date;
        while cursor <= until && cursor <= to {
            if cursor >= from {
                occurrences.push(entry.occurrence_on(cursor));
            }
            match cursor.checked_add_days(step) {
                Some(next) => cursor = next,
                None => break,
            }
        }
    }

    occurrences
}

#[cfg(test)]
mod tests {
    use super::expand_occurrences;
    use crate::model::project::{Recurrence, ScheduleEntry};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recurring(kind: Recurrence, anchor: NaiveDate, until: Option<NaiveDate>) -> ScheduleEntry {
        let mut entry = ScheduleEntry::new("repeat", anchor);
        entry.recurrence = kind;
        entry.recurrence_until = until;
        entry
    }

    #[test]
    fn one_off_entry_is_included_only_inside_window() {
        let inside = ScheduleEntry::new("inside", date(2026, 5, 7));
        let outside = ScheduleEntry::new("outside", date(2026, 5, 8));

        let result = expand_occurrences([&inside, &outside], date(2026, 5, 1), date(2026, 5, 7));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, inside.id);
    }

    #[test]
    fn daily_stops_at_recurrence_until() {
        let entry = recurring(Recurrence::Daily, date(2026, 5, 1), Some(date(2026, 5, 3)));

        let result = expand_occurrences([&entry], date(2026, 5, 1), date(2026, 5, 7));

        let dates: Vec<_> = result.iter().map(|occurrence| occurrence.date).collect();
        assert_eq!(dates, vec![date(2026, 5, 1), date(2026, 5, 2), date(2026, 5, 3)]);
        assert!(result.iter().all(|occurrence| occurrence.id == entry.id));
    }

    #[test]
    fn weekly_uses_seven_day_steps() {
        let entry = recurring(Recurrence::Weekly, date(2026, 5, 1), Some(date(2026, 5, 31)));

        let result = expand_occurrences([&entry], date(2026, 5, 1), date(2026, 5, 31));

        assert_eq!(result.len(), 5);
        assert_eq!(result.last().map(|occurrence| occurrence.date), Some(date(2026, 5, 29)));
    }

    #[test]
    fn open_ended_recurrence_is_bounded_by_query_horizon() {
        let entry = recurring(Recurrence::Daily, date(2026, 4, 28), None);

        let result = expand_occurrences([&entry], date(2026, 5, 1), date(2026, 5, 4));

        assert_eq!(result.len(), 4);
        assert_eq!(result[0].date, date(2026, 5, 1));
        assert_eq!(result[3].date, date(2026, 5, 4));
    }

    #[test]
    fn unrecognized_kind_expands_like_daily() {
        let entry = recurring(Recurrence::Unrecognized, date(2026, 5, 1), Some(date(2026, 5, 2)));

        let result = expand_occurrences([&entry], date(2026, 5, 1), date(2026, 5, 7));

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn occurrences_preserve_template_fields() {
        let mut entry = recurring(Recurrence::Weekly, date(2026, 5, 1), None);
        entry.notes = "bring slides".to_string();
        entry.start_time = chrono::NaiveTime::from_hms_opt(9, 30, 0);
        entry.linked_todo_item_id = Some(uuid::Uuid::new_v4());

        let result = expand_occurrences([&entry], date(2026, 5, 8), date(2026, 5, 8));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0], entry.occurrence_on(date(2026, 5, 8)));
    }
}
