use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{DailyActivity, UserSettings};
use crate::projection::calculator::{CompletionData, ProjectionCalculator};

/// How fast the memorizer has actually been moving, and where that pace leads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceSummary {
    pub days_elapsed: u32,
    pub pages_memorized: u32,
    pub average_since_start: f64,
    pub window_days: u32,
    /// Sabak pages per day over the last `window_days`.
    pub recent_velocity: Option<f64>,
    /// Projection at `recent_velocity` instead of the daily goal.
    pub observed: Option<CompletionData>,
}

impl PaceSummary {
    pub fn summarize(
        settings: &UserSettings,
        days: &[DailyActivity],
        today: NaiveDate,
        window_days: u32,
    ) -> Self {
        let days_elapsed = (today - settings.start_date).num_days().saturating_add(1).max(1);
        let days_elapsed = u32::try_from(days_elapsed).unwrap_or(u32::MAX);
        let pages_memorized = (settings.clamped_current() - settings.clamped_start()).max(0) as u32;
        let average_since_start = f64::from(pages_memorized) / f64::from(days_elapsed);

        let recent_velocity = recent_velocity(days, today, window_days);
        let observed = recent_velocity
            .map(|pace| ProjectionCalculator::project_at_pace(settings, pace, today));

        Self {
            days_elapsed,
            pages_memorized,
            average_since_start,
            window_days,
            recent_velocity,
            observed,
        }
    }
}

/// Mean sabak pages per day over the `window_days` days ending at `today`.
pub fn recent_velocity(days: &[DailyActivity], today: NaiveDate, window_days: u32) -> Option<f64> {
    if window_days == 0 {
        return None;
    }
    let first = today
        .checked_sub_days(Days::new(u64::from(window_days) - 1))
        .unwrap_or(NaiveDate::MIN);
    let sabak: f64 = days
        .iter()
        .filter(|d| d.date >= first && d.date <= today)
        .map(|d| d.sabak)
        .sum();
    Some(sabak / f64::from(window_days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::calculator::Forecast;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settings() -> UserSettings {
        UserSettings {
            name: "Test".to_string(),
            total_pages: 604,
            start_page: 1,
            start_date: date(2026, 10, 1),
            current_page: 33,
            daily_goal_pages: 2.0,
            revision_goal_pages: 5.0,
        }
    }

    fn sabak(d: NaiveDate, pages: f64) -> DailyActivity {
        DailyActivity {
            date: d,
            sabak: pages,
            dour: 4.0,
            manzil: 0.0,
        }
    }

    #[test]
    fn average_since_start_counts_both_ends() {
        let summary = PaceSummary::summarize(&settings(), &[], date(2026, 10, 16), 7);
        assert_eq!(summary.days_elapsed, 16);
        assert_eq!(summary.pages_memorized, 32);
        assert_eq!(summary.average_since_start, 2.0);
    }

    #[test]
    fn future_start_date_counts_as_one_day() {
        let summary = PaceSummary::summarize(&settings(), &[], date(2026, 9, 1), 7);
        assert_eq!(summary.days_elapsed, 1);
    }

    #[test]
    fn velocity_uses_only_the_window() {
        let today = date(2026, 10, 16);
        let days = vec![
            sabak(date(2026, 10, 16), 3.0),
            sabak(date(2026, 10, 12), 4.0),
            sabak(date(2026, 10, 10), 7.0),
            sabak(date(2026, 10, 9), 50.0),
        ];
        assert_eq!(recent_velocity(&days, today, 7), Some(2.0));
        assert_eq!(recent_velocity(&days, today, 0), None);
    }

    #[test]
    fn observed_projection_uses_velocity() {
        let today = date(2026, 10, 16);
        let days = vec![sabak(date(2026, 10, 15), 10.0)];
        let summary = PaceSummary::summarize(&settings(), &days, today, 5);
        assert_eq!(summary.recent_velocity, Some(2.0));
        let observed = summary.observed.unwrap();
        assert_eq!(observed.pages_remaining, 571);
        assert_eq!(observed.days_remaining(), Some(286));
    }

    #[test]
    fn stalled_memorizer_has_unbounded_observed_forecast() {
        let summary = PaceSummary::summarize(&settings(), &[], date(2026, 10, 16), 14);
        assert_eq!(summary.recent_velocity, Some(0.0));
        assert_eq!(summary.observed.unwrap().forecast, Forecast::Unbounded);
    }
}
