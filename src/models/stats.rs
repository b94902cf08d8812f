use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pages logged on one day, split by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub sabak: f64,
    pub dour: f64,
    pub manzil: f64,
}

impl DailyActivity {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            sabak: 0.0,
            dour: 0.0,
            manzil: 0.0,
        }
    }

    pub fn revision(&self) -> f64 {
        self.dour + self.manzil
    }

    pub fn total(&self) -> f64 {
        self.sabak + self.revision()
    }

    pub fn is_active(&self) -> bool {
        self.total() > 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

impl Streak {
    /// `dates` are days with any activity, in any order, duplicates allowed.
    ///
    /// The current streak may end yesterday: a day that has not been logged
    /// yet does not break it.
    pub fn from_dates(dates: &[NaiveDate], today: NaiveDate) -> Self {
        let mut sorted: Vec<NaiveDate> = dates.iter().copied().filter(|d| *d <= today).collect();
        sorted.sort();
        sorted.dedup();

        let mut best = 0u32;
        let mut run = 0u32;
        let mut prev: Option<NaiveDate> = None;
        for d in &sorted {
            run = match prev {
                Some(p) if p.succ_opt() == Some(*d) => run + 1,
                _ => 1,
            };
            best = best.max(run);
            prev = Some(*d);
        }

        let mut current = 0u32;
        let mut check = match sorted.last() {
            Some(last) if *last == today => today,
            Some(last) if Some(*last) == today.pred_opt() => *last,
            _ => return Self { current, best },
        };
        for d in sorted.iter().rev() {
            if *d != check {
                break;
            }
            current += 1;
            match check.pred_opt() {
                Some(p) => check = p,
                None => break,
            }
        }

        Self { current, best }
    }
}

/// Activity intensity for one heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatLevel {
    None,
    Light,
    Moderate,
    Goal,
    Beyond,
}

impl HeatLevel {
    /// Grade a day against `target`, the combined daily sabak and revision goal.
    pub fn for_day(day: &DailyActivity, target: f64) -> Self {
        let total = day.total();
        if total <= 0.0 {
            return HeatLevel::None;
        }
        if !(target > 0.0) {
            return HeatLevel::Beyond;
        }
        let ratio = total / target;
        if ratio < 0.5 {
            HeatLevel::Light
        } else if ratio < 1.0 {
            HeatLevel::Moderate
        } else if ratio < 1.5 {
            HeatLevel::Goal
        } else {
            HeatLevel::Beyond
        }
    }
}

/// The `weeks * 7` days ending at `today`, oldest first, with gaps filled by
/// empty days.
pub fn fill_days(days: &[DailyActivity], today: NaiveDate, weeks: u32) -> Vec<DailyActivity> {
    let span = u64::from(weeks) * 7;
    if span == 0 {
        return Vec::new();
    }
    let by_date: HashMap<NaiveDate, &DailyActivity> = days.iter().map(|d| (d.date, d)).collect();
    let Some(first) = today.checked_sub_days(Days::new(span - 1)) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|d| {
            by_date
                .get(&d)
                .map(|a| (*a).clone())
                .unwrap_or_else(|| DailyActivity::empty(d))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(d: NaiveDate, sabak: f64, dour: f64, manzil: f64) -> DailyActivity {
        DailyActivity {
            date: d,
            sabak,
            dour,
            manzil,
        }
    }

    #[test]
    fn activity_sums() {
        assert!(!DailyActivity::empty(date(2026, 3, 1)).is_active());
        let a = day(date(2026, 3, 1), 1.5, 4.0, 10.0);
        assert_eq!(a.revision(), 14.0);
        assert_eq!(a.total(), 15.5);
        assert!(a.is_active());
    }

    #[test]
    fn heat_levels_follow_target_ratio() {
        let d = date(2026, 3, 1);
        assert_eq!(HeatLevel::for_day(&day(d, 0.0, 0.0, 0.0), 7.0), HeatLevel::None);
        assert_eq!(HeatLevel::for_day(&day(d, 1.0, 2.0, 0.0), 7.0), HeatLevel::Light);
        assert_eq!(HeatLevel::for_day(&day(d, 2.0, 2.0, 0.0), 8.0), HeatLevel::Moderate);
        assert_eq!(HeatLevel::for_day(&day(d, 2.0, 5.0, 0.0), 7.0), HeatLevel::Goal);
        assert_eq!(HeatLevel::for_day(&day(d, 2.0, 5.0, 5.0), 7.0), HeatLevel::Beyond);
        assert_eq!(HeatLevel::for_day(&day(d, 0.5, 0.0, 0.0), 0.0), HeatLevel::Beyond);
        assert!(HeatLevel::Goal > HeatLevel::Moderate);
    }

    #[test]
    fn streak_counts_through_today() {
        let today = date(2026, 3, 10);
        let dates = vec![date(2026, 3, 8), date(2026, 3, 10), date(2026, 3, 9), date(2026, 3, 9)];
        let s = Streak::from_dates(&dates, today);
        assert_eq!(s, Streak { current: 3, best: 3 });
    }

    #[test]
    fn streak_survives_unlogged_today() {
        let today = date(2026, 3, 10);
        let dates = vec![date(2026, 3, 8), date(2026, 3, 9)];
        assert_eq!(Streak::from_dates(&dates, today).current, 2);
    }

    #[test]
    fn streak_breaks_on_gap_but_keeps_best() {
        let today = date(2026, 3, 10);
        let dates = vec![
            date(2026, 2, 1),
            date(2026, 2, 2),
            date(2026, 2, 3),
            date(2026, 2, 4),
            date(2026, 3, 7),
            date(2026, 3, 8),
        ];
        let s = Streak::from_dates(&dates, today);
        assert_eq!(s.current, 0);
        assert_eq!(s.best, 4);
    }

    #[test]
    fn empty_log_has_no_streak() {
        assert_eq!(Streak::from_dates(&[], date(2026, 3, 10)), Streak::default());
    }

    #[test]
    fn fill_days_covers_whole_weeks() {
        let today = date(2026, 3, 14);
        let logged = vec![day(date(2026, 3, 10), 2.0, 0.0, 0.0), day(date(2026, 1, 1), 9.0, 0.0, 0.0)];
        let grid = fill_days(&logged, today, 2);
        assert_eq!(grid.len(), 14);
        assert_eq!(grid[0].date, date(2026, 3, 1));
        assert_eq!(grid[13].date, today);
        assert_eq!(grid[9].sabak, 2.0);
        assert_eq!(grid.iter().filter(|d| d.is_active()).count(), 1);
        assert!(fill_days(&logged, today, 0).is_empty());
    }
}
