use anyhow::{anyhow, Result};
use chrono::{Days, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

use crate::models::stats::fill_days;
use crate::models::{DailyActivity, ReviewEntry, ReviewKind, Streak};

const DATE_FMT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|e| anyhow!("Bad date '{}': {}", s, e))
}

// ─── Review log ──────────────────────────────────────────────────────────────

pub struct ReviewRepo;

impl ReviewRepo {
    /// Add pages to the day's row for `kind`, creating it if needed.
    /// A given note replaces the stored one; `None` keeps it.
    pub fn log_pages(
        conn: &Connection,
        date: NaiveDate,
        kind: ReviewKind,
        pages: f64,
        note: Option<&str>,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO review_log (date, kind, pages, note) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date, kind) DO UPDATE SET
                pages = pages + ?3,
                note = COALESCE(?4, note)",
            params![format_date(date), kind.as_str(), pages, note],
        )?;
        log::debug!("Logged {} {} pages on {}", pages, kind.as_str(), date);
        Ok(())
    }

    pub fn get_entries_for_date(conn: &Connection, date: NaiveDate) -> Result<Vec<ReviewEntry>> {
        let mut stmt = conn.prepare(
            "SELECT id, date, kind, pages, note FROM review_log WHERE date = ?1
             ORDER BY CASE kind WHEN 'sabak' THEN 1 WHEN 'dour' THEN 2 WHEN 'manzil' THEN 3 END",
        )?;

        let rows = stmt.query_map(params![format_date(date)], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, date, kind, pages, note) = r?;
            result.push(ReviewEntry {
                id: Some(id),
                date: parse_date(&date)?,
                kind: ReviewKind::from_str(&kind)?,
                pages,
                note,
            });
        }
        Ok(result)
    }

    /// Per-day totals for every logged day in `[start, end]`, oldest first.
    pub fn get_activity_range(
        conn: &Connection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyActivity>> {
        let mut stmt = conn.prepare(
            "SELECT date,
                    SUM(CASE WHEN kind = 'sabak'  THEN pages ELSE 0 END),
                    SUM(CASE WHEN kind = 'dour'   THEN pages ELSE 0 END),
                    SUM(CASE WHEN kind = 'manzil' THEN pages ELSE 0 END)
             FROM review_log
             WHERE date >= ?1 AND date <= ?2
             GROUP BY date
             ORDER BY date",
        )?;

        let rows = stmt.query_map(params![format_date(start), format_date(end)], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (date, sabak, dour, manzil) = r?;
            result.push(DailyActivity {
                date: parse_date(&date)?,
                sabak,
                dour,
                manzil,
            });
        }
        Ok(result)
    }

    pub fn get_day(conn: &Connection, date: NaiveDate) -> Result<DailyActivity> {
        Ok(Self::get_activity_range(conn, date, date)?
            .into_iter()
            .next()
            .unwrap_or_else(|| DailyActivity::empty(date)))
    }

    pub fn total_for_kind(
        conn: &Connection,
        kind: ReviewKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64> {
        conn.query_row(
            "SELECT COALESCE(SUM(pages), 0) FROM review_log WHERE kind = ?1 AND date >= ?2 AND date <= ?3",
            params![kind.as_str(), format_date(start), format_date(end)],
            |row| row.get(0),
        )
        .map_err(anyhow::Error::from)
    }

    /// Dates with any pages logged, newest first.
    pub fn active_dates(conn: &Connection) -> Result<Vec<NaiveDate>> {
        let mut stmt = conn.prepare(
            "SELECT date FROM review_log
             GROUP BY date
             HAVING SUM(pages) > 0
             ORDER BY date DESC",
        )?;

        let dates: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        dates.iter().map(|d| parse_date(d)).collect()
    }
}

// ─── Stats repo ──────────────────────────────────────────────────────────────

pub struct StatsRepo;

impl StatsRepo {
    pub fn calculate_streak(conn: &Connection, today: NaiveDate) -> Result<Streak> {
        let dates = ReviewRepo::active_dates(conn)?;
        Ok(Streak::from_dates(&dates, today))
    }

    /// The last `weeks` whole weeks ending at `today`, gaps filled.
    pub fn get_heatmap(conn: &Connection, today: NaiveDate, weeks: u32) -> Result<Vec<DailyActivity>> {
        let span = u64::from(weeks.max(1)) * 7;
        let start = today
            .checked_sub_days(Days::new(span - 1))
            .unwrap_or(NaiveDate::MIN);
        let logged = ReviewRepo::get_activity_range(conn, start, today)?;
        Ok(fill_days(&logged, today, weeks))
    }

    /// The 7 days ending at `today`, gaps filled.
    pub fn get_week(conn: &Connection, today: NaiveDate) -> Result<Vec<DailyActivity>> {
        Self::get_heatmap(conn, today, 1)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use tempfile::tempdir;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn logging_twice_adds_pages() {
        let conn = conn();
        let d = date(2026, 10, 16);
        ReviewRepo::log_pages(&conn, d, ReviewKind::Sabak, 1.5, None).unwrap();
        ReviewRepo::log_pages(&conn, d, ReviewKind::Sabak, 0.5, Some("Al-Mulk")).unwrap();
        ReviewRepo::log_pages(&conn, d, ReviewKind::Manzil, 20.0, None).unwrap();

        let entries = ReviewRepo::get_entries_for_date(&conn, d).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, ReviewKind::Sabak);
        assert_eq!(entries[0].pages, 2.0);
        assert_eq!(entries[0].note.as_deref(), Some("Al-Mulk"));
        assert_eq!(entries[1].kind, ReviewKind::Manzil);

        ReviewRepo::log_pages(&conn, d, ReviewKind::Sabak, 1.0, None).unwrap();
        let entries = ReviewRepo::get_entries_for_date(&conn, d).unwrap();
        assert_eq!(entries[0].pages, 3.0);
        assert_eq!(entries[0].note.as_deref(), Some("Al-Mulk"));
    }

    #[test]
    fn activity_range_groups_by_day() {
        let conn = conn();
        ReviewRepo::log_pages(&conn, date(2026, 10, 14), ReviewKind::Sabak, 2.0, None).unwrap();
        ReviewRepo::log_pages(&conn, date(2026, 10, 14), ReviewKind::Dour, 5.0, None).unwrap();
        ReviewRepo::log_pages(&conn, date(2026, 10, 16), ReviewKind::Manzil, 10.0, None).unwrap();
        ReviewRepo::log_pages(&conn, date(2026, 9, 1), ReviewKind::Sabak, 9.0, None).unwrap();

        let days =
            ReviewRepo::get_activity_range(&conn, date(2026, 10, 10), date(2026, 10, 16)).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(2026, 10, 14));
        assert_eq!(days[0].sabak, 2.0);
        assert_eq!(days[0].revision(), 5.0);
        assert_eq!(days[1].manzil, 10.0);

        let empty = ReviewRepo::get_day(&conn, date(2026, 10, 15)).unwrap();
        assert!(!empty.is_active());

        let sabak = ReviewRepo::total_for_kind(
            &conn,
            ReviewKind::Sabak,
            date(2026, 9, 1),
            date(2026, 10, 16),
        )
        .unwrap();
        assert_eq!(sabak, 11.0);
    }

    #[test]
    fn streak_and_heatmap_from_log() {
        let conn = conn();
        let today = date(2026, 10, 16);
        for d in [13, 14, 15, 16] {
            ReviewRepo::log_pages(&conn, date(2026, 10, d), ReviewKind::Dour, 3.0, None).unwrap();
        }
        ReviewRepo::log_pages(&conn, date(2026, 10, 1), ReviewKind::Sabak, 1.0, None).unwrap();

        let streak = StatsRepo::calculate_streak(&conn, today).unwrap();
        assert_eq!(streak, Streak { current: 4, best: 4 });

        let grid = StatsRepo::get_heatmap(&conn, today, 3).unwrap();
        assert_eq!(grid.len(), 21);
        assert_eq!(grid.iter().filter(|d| d.is_active()).count(), 5);

        let week = StatsRepo::get_week(&conn, today).unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[6].date, today);
    }

    #[test]
    fn meta_get_set() {
        let conn = conn();
        assert_eq!(MetaRepo::get(&conn, "setup_done").unwrap(), None);
        MetaRepo::set(&conn, "setup_done", "0").unwrap();
        MetaRepo::set(&conn, "setup_done", "1").unwrap();
        assert_eq!(MetaRepo::get(&conn, "setup_done").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn persists_across_connections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hafiz.db");
        {
            let conn = Connection::open(&path).unwrap();
            run_migrations(&conn).unwrap();
            ReviewRepo::log_pages(&conn, date(2026, 10, 16), ReviewKind::Sabak, 2.0, None).unwrap();
        }
        let conn = Connection::open(&path).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(ReviewRepo::get_day(&conn, date(2026, 10, 16)).unwrap().sabak, 2.0);
    }
}
