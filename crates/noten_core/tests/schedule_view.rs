use chrono::{NaiveDate, NaiveTime};
use noten_core::{expand_occurrences, filter_and_sort, Recurrence, ScheduleEntry, ScheduleScope};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(title: &str, day: NaiveDate, hour: Option<u32>) -> ScheduleEntry {
    let mut entry = ScheduleEntry::new(title, day);
    entry.start_time = hour.and_then(|h| NaiveTime::from_hms_opt(h, 0, 0));
    entry
}

fn titles(entries: &[ScheduleEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.title.as_str()).collect()
}

#[test]
fn today_scope_returns_only_today_sorted_by_start_time() {
    let today = date(2026, 5, 3);
    let entries = vec![
        at("B", today, Some(10)),
        at("A", today, Some(9)),
        at("Tomorrow", date(2026, 5, 4), Some(8)),
    ];

    let visible = filter_and_sort(&entries, ScheduleScope::Today, today);

    assert_eq!(titles(&visible), vec!["A", "B"]);
}

#[test]
fn upcoming_scope_excludes_past_dates() {
    let today = date(2026, 5, 3);
    let entries = vec![
        at("Past", date(2026, 5, 2), None),
        at("Today", today, None),
        at("Future", date(2026, 5, 5), None),
    ];

    let visible = filter_and_sort(&entries, ScheduleScope::Upcoming, today);

    assert_eq!(titles(&visible), vec!["Today", "Future"]);
    assert!(visible.iter().all(|entry| entry.date >= today));
}

#[test]
fn all_scope_keeps_yesterday_but_not_older_or_beyond_horizon() {
    let today = date(2026, 5, 3);
    let entries = vec![
        at("Yesterday", date(2026, 5, 2), None),
        at("Older", date(2026, 5, 1), None),
        at("Horizon", date(2026, 11, 3), None),
        at("Beyond", date(2026, 11, 4), None),
    ];

    let visible = filter_and_sort(&entries, ScheduleScope::All, today);

    assert_eq!(titles(&visible), vec!["Yesterday", "Horizon"]);
}

#[test]
fn untimed_entries_sort_last_and_titles_break_ties_case_insensitively() {
    let today = date(2026, 5, 3);
    let entries = vec![
        at("untimed", today, None),
        at("beta", today, Some(9)),
        at("Alpha", today, Some(9)),
        at("early", today, Some(7)),
    ];

    let visible = filter_and_sort(&entries, ScheduleScope::Today, today);

    assert_eq!(titles(&visible), vec!["early", "Alpha", "beta", "untimed"]);
}

#[test]
fn equal_keys_keep_input_order() {
    let today = date(2026, 5, 3);
    let first = at("Same", today, Some(9));
    let second = at("same", today, Some(9));
    let entries = vec![first.clone(), second.clone()];

    let visible = filter_and_sort(&entries, ScheduleScope::Today, today);

    assert_eq!(visible[0].id, first.id);
    assert_eq!(visible[1].id, second.id);
}

#[test]
fn recurring_entries_appear_once_per_day_in_window() {
    let today = date(2026, 5, 3);
    let mut standup = at("Standup", date(2026, 4, 1), Some(9));
    standup.recurrence = Recurrence::Daily;
    standup.recurrence_until = Some(date(2026, 5, 5));

    let upcoming = filter_and_sort([&standup], ScheduleScope::Upcoming, today);

    let dates: Vec<_> = upcoming.iter().map(|entry| entry.date).collect();
    assert_eq!(dates, vec![date(2026, 5, 3), date(2026, 5, 4), date(2026, 5, 5)]);
}

#[test]
fn weekly_expansion_over_may() {
    let mut sync = at("Weekly sync", date(2026, 5, 1), None);
    sync.recurrence = Recurrence::Weekly;
    sync.recurrence_until = Some(date(2026, 5, 31));

    let occurrences = expand_occurrences([&sync], date(2026, 5, 1), date(2026, 5, 31));

    assert_eq!(occurrences.len(), 5);
    assert_eq!(occurrences[4].date, date(2026, 5, 29));
}
