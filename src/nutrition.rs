use crate::models::{DailyNutrition, DailyPoint, NutritionAverages};

/// Clamp a counter update at zero. Applies identically to protein and water.
pub fn update_counter(current: f64, delta: f64) -> f64 {
    (current + delta).max(0.0)
}

/// Fold today's record into the dated history, replacing any existing entry
/// for the same date. The returned history holds at most one entry per date
/// and is sorted ascending, so repeated folds of the same record are no-ops.
pub fn merge_into_history(
    mut history: Vec<DailyNutrition>,
    today: DailyNutrition,
) -> Vec<DailyNutrition> {
    history.retain(|day| day.date != today.date);
    history.push(today);
    history.sort_by_key(|day| day.date);
    history
}

/// The last `n` entries of an ascending history, oldest first. Returns the
/// whole history when it is shorter than `n`.
pub fn rolling_window(history: &[DailyNutrition], n: usize) -> Vec<DailyNutrition> {
    history[history.len().saturating_sub(n)..].to_vec()
}

/// Rounded percentage of a daily goal. Callers guarantee `goal > 0`.
pub fn percent_of_goal(value: f64, goal: f64) -> i64 {
    (value / goal * 100.0).round() as i64
}

/// Rounded per-day averages plus the percentage of days on which each goal
/// was met or exceeded. All zero for an empty history.
pub fn average_and_goal_met_rate(history: &[DailyNutrition]) -> NutritionAverages {
    if history.is_empty() {
        return NutritionAverages::default();
    }

    let len = history.len() as f64;
    let protein_sum: f64 = history.iter().map(|day| day.protein).sum();
    let water_sum: f64 = history.iter().map(|day| day.water).sum();
    let protein_days_met = history
        .iter()
        .filter(|day| day.protein >= day.protein_goal)
        .count() as f64;
    let water_days_met = history
        .iter()
        .filter(|day| day.water >= day.water_goal)
        .count() as f64;

    NutritionAverages {
        avg_protein: (protein_sum / len).round() as i64,
        avg_water: (water_sum / len).round() as i64,
        pct_days_protein_goal_met: (protein_days_met / len * 100.0).round() as i64,
        pct_days_water_goal_met: (water_days_met / len * 100.0).round() as i64,
    }
}

/// Chart points for the last seven days of history, with per-day goal
/// percentages precomputed for the progress view.
pub fn build_chart_points(history: &[DailyNutrition]) -> Vec<DailyPoint> {
    rolling_window(history, 7)
        .into_iter()
        .map(|day| DailyPoint {
            protein_percent: percent_of_goal(day.protein, day.protein_goal),
            water_percent: percent_of_goal(day.water, day.water_goal),
            date: day.date,
            protein: day.protein,
            protein_goal: day.protein_goal,
            water: day.water,
            water_goal: day.water_goal,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(date: &str, protein: f64, water: f64) -> DailyNutrition {
        DailyNutrition {
            date: date.parse::<NaiveDate>().unwrap(),
            protein,
            water,
            protein_goal: 100.0,
            water_goal: 2000.0,
        }
    }

    #[test]
    fn update_counter_adds_and_clamps() {
        assert_eq!(update_counter(50.0, 20.0), 70.0);
        assert_eq!(update_counter(50.0, -20.0), 30.0);
        assert_eq!(update_counter(3.0, -10.0), 0.0);
        assert_eq!(update_counter(0.0, 0.0), 0.0);
    }

    #[test]
    fn merge_replaces_same_date_and_sorts() {
        let history = vec![day("2024-01-03", 10.0, 100.0), day("2024-01-01", 20.0, 200.0)];
        let merged = merge_into_history(history, day("2024-01-02", 30.0, 300.0));

        let dates: Vec<String> = merged.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);

        let replaced = merge_into_history(merged, day("2024-01-02", 99.0, 999.0));
        assert_eq!(replaced.len(), 3);
        assert_eq!(replaced[1].protein, 99.0);
    }

    #[test]
    fn merge_is_idempotent() {
        let once = merge_into_history(Vec::new(), day("2024-01-05", 40.0, 400.0));
        let twice = merge_into_history(once.clone(), day("2024-01-05", 40.0, 400.0));
        assert_eq!(once.len(), twice.len());
        assert_eq!(once[0].protein, twice[0].protein);
    }

    #[test]
    fn rolling_window_is_a_suffix() {
        let history: Vec<DailyNutrition> = (1..=10)
            .map(|n| day(&format!("2024-01-{n:02}"), n as f64, 0.0))
            .collect();

        let window = rolling_window(&history, 7);
        assert_eq!(window.len(), 7);
        assert_eq!(window[0].date.to_string(), "2024-01-04");
        assert_eq!(window[6].date.to_string(), "2024-01-10");

        let short = rolling_window(&history[..3], 7);
        assert_eq!(short.len(), 3);
    }

    #[test]
    fn percent_of_goal_rounds() {
        assert_eq!(percent_of_goal(50.0, 100.0), 50);
        assert_eq!(percent_of_goal(120.0, 100.0), 120);
        assert_eq!(percent_of_goal(1.0, 3.0), 33);
        assert_eq!(percent_of_goal(0.0, 2000.0), 0);
    }

    #[test]
    fn averages_on_empty_history_are_zero() {
        assert_eq!(average_and_goal_met_rate(&[]), NutritionAverages::default());
    }

    #[test]
    fn averages_and_goal_met_rate() {
        let history = vec![day("2024-01-01", 50.0, 2000.0), day("2024-01-02", 120.0, 1000.0)];
        let summary = average_and_goal_met_rate(&history);
        assert_eq!(summary.avg_protein, 85);
        assert_eq!(summary.avg_water, 1500);
        assert_eq!(summary.pct_days_protein_goal_met, 50);
        assert_eq!(summary.pct_days_water_goal_met, 50);
    }

    #[test]
    fn chart_points_carry_goal_percentages() {
        let history = vec![day("2024-01-01", 25.0, 500.0)];
        let points = build_chart_points(&history);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].protein_percent, 25);
        assert_eq!(points[0].water_percent, 25);
    }
}
