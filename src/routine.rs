use crate::models::RoutineSchedule;
use chrono::{Duration, NaiveDate, NaiveTime};
use uuid::Uuid;

/// Next scheduled injection, computed from the anchor date (last injection,
/// or today when none exists) and the configured interval. Recomputed from
/// current inputs on every create/edit rather than advanced incrementally,
/// so the date is always reproducible and cannot drift.
pub fn next_injection_date(anchor: NaiveDate, frequency_days: u32) -> NaiveDate {
    anchor + Duration::days(i64::from(frequency_days))
}

/// A fresh, active schedule.
pub fn create(
    frequency_days: u32,
    preferred_time: NaiveTime,
    reminder_lead_hours: u32,
    anchor: Option<NaiveDate>,
    today: NaiveDate,
) -> RoutineSchedule {
    RoutineSchedule {
        id: Uuid::new_v4().to_string(),
        frequency_days,
        preferred_time,
        reminder_lead_hours,
        active: true,
        next_injection_date: next_injection_date(anchor.unwrap_or(today), frequency_days),
    }
}

/// Re-derive the schedule from new settings, keeping `id` and `active`.
pub fn edit(
    existing: &RoutineSchedule,
    frequency_days: u32,
    preferred_time: NaiveTime,
    reminder_lead_hours: u32,
    anchor: Option<NaiveDate>,
    today: NaiveDate,
) -> RoutineSchedule {
    RoutineSchedule {
        id: existing.id.clone(),
        frequency_days,
        preferred_time,
        reminder_lead_hours,
        active: existing.active,
        next_injection_date: next_injection_date(anchor.unwrap_or(today), frequency_days),
    }
}

/// Flip active/paused without touching the computed date.
pub fn toggle_active(mut schedule: RoutineSchedule) -> RoutineSchedule {
    schedule.active = !schedule.active;
    schedule
}

/// Days from `now` to the next injection. Zero means due today; negative
/// means overdue (the UI renders both as "today").
pub fn days_until_next(schedule: &RoutineSchedule, now: NaiveDate) -> i64 {
    (schedule.next_injection_date - now).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn create_computes_next_date_from_anchor() {
        let schedule = create(7, time("09:00"), 24, Some(date("2024-01-01")), date("2024-03-15"));
        assert_eq!(schedule.next_injection_date, date("2024-01-08"));
        assert!(schedule.active);
    }

    #[test]
    fn create_defaults_anchor_to_today() {
        let schedule = create(7, time("09:00"), 24, None, date("2024-03-15"));
        assert_eq!(schedule.next_injection_date, date("2024-03-22"));
    }

    #[test]
    fn edit_recomputes_but_preserves_identity() {
        let original = create(7, time("09:00"), 24, Some(date("2024-01-01")), date("2024-01-01"));
        let paused = toggle_active(original.clone());
        let edited = edit(&paused, 14, time("18:30"), 12, Some(date("2024-01-01")), date("2024-01-05"));

        assert_eq!(edited.id, original.id);
        assert!(!edited.active);
        assert_eq!(edited.frequency_days, 14);
        assert_eq!(edited.next_injection_date, date("2024-01-15"));
    }

    #[test]
    fn toggle_flips_only_the_active_flag() {
        let schedule = create(7, time("09:00"), 24, None, date("2024-01-01"));
        let paused = toggle_active(schedule.clone());
        assert!(!paused.active);
        assert_eq!(paused.next_injection_date, schedule.next_injection_date);
        assert!(toggle_active(paused).active);
    }

    #[test]
    fn days_until_next_counts_signed_days() {
        let mut schedule = create(7, time("09:00"), 24, Some(date("2024-01-01")), date("2024-01-01"));
        schedule.next_injection_date = date("2024-01-08");

        assert_eq!(days_until_next(&schedule, date("2024-01-08")), 0);
        assert_eq!(days_until_next(&schedule, date("2024-01-07")), 1);
        assert_eq!(days_until_next(&schedule, date("2024-01-10")), -2);
    }
}
