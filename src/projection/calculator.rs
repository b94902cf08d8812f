use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::UserSettings;

/// The mushaf is divided into thirty equal juz.
pub const JUZ_COUNT: i32 = 30;

/// When the memorizer is expected to finish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Forecast {
    Scheduled {
        days_remaining: u32,
        completion_date: NaiveDate,
    },
    /// No positive pace to extrapolate from, or the date would fall off the
    /// calendar.
    Unbounded,
}

/// Progress figures derived from a profile. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionData {
    pub forecast: Forecast,
    pub progress_percentage: f64,
    pub juz_completed: u32,
    pub pages_remaining: u32,
}

impl CompletionData {
    pub fn days_remaining(&self) -> Option<u32> {
        match self.forecast {
            Forecast::Scheduled { days_remaining, .. } => Some(days_remaining),
            Forecast::Unbounded => None,
        }
    }

    pub fn estimated_completion_date(&self) -> Option<NaiveDate> {
        match self.forecast {
            Forecast::Scheduled {
                completion_date, ..
            } => Some(completion_date),
            Forecast::Unbounded => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pages_remaining == 0
    }
}

/// Linear completion projection at the profile's daily goal.
pub struct ProjectionCalculator;

impl ProjectionCalculator {
    pub fn project(settings: &UserSettings, today: NaiveDate) -> CompletionData {
        Self::project_at_pace(settings, settings.daily_goal_pages, today)
    }

    /// Same projection with the daily pace supplied by the caller.
    pub fn project_at_pace(settings: &UserSettings, pages_per_day: f64, today: NaiveDate) -> CompletionData {
        let total = settings.clamped_total();
        let start = settings.clamped_start();
        let current = settings.clamped_current();

        let pages_remaining = (total - current).max(0) as u32;

        CompletionData {
            forecast: forecast(pages_remaining, pages_per_day, today),
            progress_percentage: progress_percentage(start, current, total),
            juz_completed: juz_completed(current, total),
            pages_remaining,
        }
    }
}

fn progress_percentage(start: i32, current: i32, total: i32) -> f64 {
    if current >= total {
        return 100.0;
    }
    let span = total - start;
    if span <= 0 {
        return 0.0;
    }
    (f64::from(current - start) / f64::from(span) * 100.0).clamp(0.0, 100.0)
}

// floor(current / (total / 30)) done in integers to stay exact at juz boundaries.
fn juz_completed(current: i32, total: i32) -> u32 {
    let juz = i64::from(current) * i64::from(JUZ_COUNT) / i64::from(total);
    juz.clamp(0, i64::from(JUZ_COUNT)) as u32
}

fn forecast(pages_remaining: u32, pages_per_day: f64, today: NaiveDate) -> Forecast {
    if pages_remaining == 0 {
        return Forecast::Scheduled {
            days_remaining: 0,
            completion_date: today,
        };
    }
    if !pages_per_day.is_finite() || pages_per_day <= 0.0 {
        return Forecast::Unbounded;
    }

    let days = (f64::from(pages_remaining) / pages_per_day).ceil();
    if days > f64::from(u32::MAX) {
        return Forecast::Unbounded;
    }
    let days_remaining = days as u32;

    match today.checked_add_days(Days::new(u64::from(days_remaining))) {
        Some(completion_date) => Forecast::Scheduled {
            days_remaining,
            completion_date,
        },
        None => Forecast::Unbounded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn settings(current_page: i32, daily_goal_pages: f64) -> UserSettings {
        UserSettings {
            name: "Test".to_string(),
            total_pages: 604,
            start_page: 1,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            current_page,
            daily_goal_pages,
            revision_goal_pages: 5.0,
        }
    }

    #[test]
    fn reference_profile() {
        let data = ProjectionCalculator::project(&settings(45, 2.0), today());
        assert_eq!(data.pages_remaining, 559);
        assert_eq!(data.days_remaining(), Some(280));
        assert_eq!(data.juz_completed, 2);
        assert_eq!(
            data.estimated_completion_date(),
            Some(NaiveDate::from_ymd_opt(2027, 7, 23).unwrap())
        );
        let expected = 44.0 / 603.0 * 100.0;
        assert!((data.progress_percentage - expected).abs() < 1e-9);
    }

    #[test]
    fn finished_profile() {
        let data = ProjectionCalculator::project(&settings(604, 2.0), today());
        assert_eq!(data.progress_percentage, 100.0);
        assert_eq!(data.days_remaining(), Some(0));
        assert_eq!(data.pages_remaining, 0);
        assert_eq!(data.juz_completed, 30);
        assert_eq!(data.estimated_completion_date(), Some(today()));
        assert!(data.is_complete());
    }

    #[test]
    fn finished_profile_needs_no_pace() {
        let data = ProjectionCalculator::project(&settings(604, 0.0), today());
        assert_eq!(data.days_remaining(), Some(0));
    }

    #[test]
    fn zero_goal_is_unbounded() {
        let data = ProjectionCalculator::project(&settings(45, 0.0), today());
        assert_eq!(data.forecast, Forecast::Unbounded);
        assert_eq!(data.days_remaining(), None);
        assert_eq!(data.estimated_completion_date(), None);
        assert_eq!(data.pages_remaining, 559);
        assert_eq!(data.juz_completed, 2);
    }

    #[test]
    fn negative_and_nan_goals_are_unbounded() {
        for goal in [-1.0, f64::NAN, f64::INFINITY] {
            let data = ProjectionCalculator::project(&settings(45, goal), today());
            assert_eq!(data.forecast, Forecast::Unbounded);
        }
    }

    #[test]
    fn tiny_goal_past_the_calendar_is_unbounded() {
        let data = ProjectionCalculator::project(&settings(1, 1e-12), today());
        assert_eq!(data.forecast, Forecast::Unbounded);
    }

    #[test]
    fn fractional_goal_rounds_days_up() {
        let data = ProjectionCalculator::project(&settings(600, 1.5), today());
        assert_eq!(data.pages_remaining, 4);
        assert_eq!(data.days_remaining(), Some(3));
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let over = ProjectionCalculator::project(&settings(900, 2.0), today());
        assert_eq!(over.pages_remaining, 0);
        assert_eq!(over.progress_percentage, 100.0);
        assert_eq!(over.juz_completed, 30);

        let negative = ProjectionCalculator::project(&settings(-20, 2.0), today());
        assert_eq!(negative.pages_remaining, 604);
        assert_eq!(negative.progress_percentage, 0.0);
        assert_eq!(negative.juz_completed, 0);
        assert_eq!(negative.days_remaining(), Some(302));
    }

    #[test]
    fn progress_stays_in_range() {
        for current in (-10..=620).step_by(7) {
            for goal in [0.25, 1.0, 2.0, 7.5] {
                let data = ProjectionCalculator::project(&settings(current, goal), today());
                assert!((0.0..=100.0).contains(&data.progress_percentage));
                assert!(data.juz_completed <= 30);
                let expected = (604 - current.clamp(0, 604)) as u32;
                assert_eq!(data.pages_remaining, expected);
            }
        }
    }

    #[test]
    fn start_equal_to_total_does_not_divide_by_zero() {
        let mut s = settings(600, 2.0);
        s.start_page = 604;
        let data = ProjectionCalculator::project(&s, today());
        assert_eq!(data.progress_percentage, 0.0);
        s.current_page = 604;
        let data = ProjectionCalculator::project(&s, today());
        assert_eq!(data.progress_percentage, 100.0);
    }

    #[test]
    fn later_start_page_scales_progress() {
        let mut s = settings(303, 2.0);
        s.start_page = 2;
        let data = ProjectionCalculator::project(&s, today());
        assert!((data.progress_percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn projection_is_pure() {
        let s = settings(123, 3.0);
        assert_eq!(
            ProjectionCalculator::project(&s, today()),
            ProjectionCalculator::project(&s, today())
        );
    }

    #[test]
    fn explicit_pace_overrides_goal() {
        let s = settings(45, 2.0);
        let data = ProjectionCalculator::project_at_pace(&s, 1.0, today());
        assert_eq!(data.days_remaining(), Some(559));
        let stalled = ProjectionCalculator::project_at_pace(&s, 0.0, today());
        assert_eq!(stalled.forecast, Forecast::Unbounded);
    }
}
