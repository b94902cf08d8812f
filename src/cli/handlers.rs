use anyhow::{bail, Result};
use chrono::{Datelike, Local, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;

use crate::cli::args::SetArgs;
use crate::config::AppConfig;
use crate::db::repository::{MetaRepo, ReviewRepo, StatsRepo};
use crate::models::{DailyActivity, HeatLevel, ReviewKind, SettingsError, Streak, UserSettings};
use crate::projection::{CompletionData, Forecast, PaceSummary, ProjectionCalculator};
use crate::utils::format::{format_days, format_pages, pad_right, progress_bar};
use crate::utils::hijri::hijri_string;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";
const RESET: &str = "\x1b[0m";

// ─── Report ──────────────────────────────────────────────────────────────────

/// Everything the status and export views show, computed once.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub date: NaiveDate,
    pub profile: UserSettings,
    pub completion: CompletionData,
    pub completion_hijri: Option<String>,
    pub pace: PaceSummary,
    pub streak: Streak,
    pub today: DailyActivity,
    pub week: Vec<DailyActivity>,
}

pub fn build_report(conn: &Connection, config: &AppConfig, today: NaiveDate) -> Result<Report> {
    let profile = config.profile.clone();
    let completion = ProjectionCalculator::project(&profile, today);
    let completion_hijri = completion
        .estimated_completion_date()
        .and_then(|d| hijri_string(d, config.report.hijri_offset));

    let window = config.report.velocity_window_days;
    let history_start = today
        .checked_sub_days(chrono::Days::new(u64::from(window.max(1)) - 1))
        .unwrap_or(NaiveDate::MIN);
    let history = ReviewRepo::get_activity_range(conn, history_start, today)?;
    let pace = PaceSummary::summarize(&profile, &history, today, window);

    Ok(Report {
        date: today,
        completion,
        completion_hijri,
        pace,
        streak: StatsRepo::calculate_streak(conn, today)?,
        today: ReviewRepo::get_day(conn, today)?,
        week: StatsRepo::get_week(conn, today)?,
        profile,
    })
}

// ─── Setup wizard ────────────────────────────────────────────────────────────

pub fn handle_setup(conn: &Connection, config: &mut AppConfig, reset: bool) -> Result<()> {
    if !reset {
        if let Some(done) = MetaRepo::get(conn, "setup_done")? {
            if done == "1" {
                println!("hafiz is already configured. Use --reset to reconfigure.");
                return Ok(());
            }
        }
    }
    crate::cli::setup_tui::run_setup_tui(conn, config)
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn handle_status(conn: &Connection, config: &AppConfig, json: bool) -> Result<()> {
    let report = build_report(conn, config, Local::now().date_naive())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println_colored!(GOLD, "  Hifz progress — {}", report.profile.name);
    println!();
    print_projection(&report.profile, &report.completion, report.completion_hijri.as_deref());
    println!();

    let p = &report.profile;
    let sabak_color = if report.today.sabak >= p.daily_goal_pages { GREEN } else { AMBER };
    let revision_color = if report.today.revision() >= p.revision_goal_pages { GREEN } else { AMBER };
    println!(
        "  Today:      {}Sabak {} / {}{}  ·  {}Revision {} / {}{}",
        sabak_color,
        format_pages(report.today.sabak),
        format_pages(p.daily_goal_pages),
        RESET,
        revision_color,
        format_pages(report.today.revision()),
        format_pages(p.revision_goal_pages),
        RESET,
    );
    println!(
        "  Streak:     {} days current  |  {} days best",
        report.streak.current, report.streak.best
    );
    print_pace(&report.pace);
    println!();
    Ok(())
}

fn print_projection(profile: &UserSettings, completion: &CompletionData, hijri: Option<&str>) {
    println_colored!(
        BOLD,
        "  {}  {:.1}%   page {} / {}",
        progress_bar(completion.progress_percentage / 100.0, 24),
        completion.progress_percentage,
        profile.clamped_current(),
        profile.clamped_total()
    );
    println!("  Juz:        {} / 30", completion.juz_completed);
    println!("  Remaining:  {} pages", completion.pages_remaining);

    match completion.forecast {
        Forecast::Scheduled { .. } if completion.is_complete() => {
            println_colored!(GREEN, "  Forecast:   Khatam complete ✓");
        }
        Forecast::Scheduled {
            days_remaining,
            completion_date,
        } => {
            let hijri = hijri.map(|h| format!("  ·  {}", h)).unwrap_or_default();
            println_colored!(
                AMBER,
                "  Forecast:   {} → {}{}",
                format_days(days_remaining),
                completion_date.format("%d %b %Y"),
                hijri
            );
        }
        Forecast::Unbounded => {
            println_colored!(DIM, "  Forecast:   no forecast at this pace");
        }
    }
}

fn print_pace(pace: &PaceSummary) {
    println!(
        "  Pace:       {}/day since start ({} pages in {})",
        format_pages(pace.average_since_start),
        pace.pages_memorized,
        format_days(pace.days_elapsed)
    );
    if let (Some(velocity), Some(observed)) = (pace.recent_velocity, &pace.observed) {
        let outlook = match observed.forecast {
            Forecast::Scheduled { .. } if observed.is_complete() => "complete".to_string(),
            Forecast::Scheduled {
                days_remaining,
                completion_date,
            } => format!("{} → {}", format_days(days_remaining), completion_date.format("%d %b %Y")),
            Forecast::Unbounded => "no sabak logged".to_string(),
        };
        println_colored!(
            DIM,
            "  At recent pace ({}/day over {} days): {}",
            format_pages(velocity),
            pace.window_days,
            outlook
        );
    }
}

// ─── Set ─────────────────────────────────────────────────────────────────────

/// Overlay the given fields on `settings` and validate the result.
pub fn apply_set(settings: &UserSettings, args: &SetArgs) -> Result<UserSettings, SettingsError> {
    let mut next = settings.clone();
    if let Some(name) = &args.name {
        next.name = name.trim().to_string();
    }
    if let Some(v) = args.total_pages {
        next.total_pages = v;
    }
    if let Some(v) = args.start_page {
        next.start_page = v;
    }
    if let Some(v) = args.start_date {
        next.start_date = v;
    }
    if let Some(v) = args.current_page {
        next.current_page = v;
    }
    if let Some(v) = args.daily_goal {
        next.daily_goal_pages = v;
    }
    if let Some(v) = args.revision_goal {
        next.revision_goal_pages = v;
    }
    next.validate()?;
    Ok(next)
}

pub fn handle_set(config: &mut AppConfig, args: &SetArgs) -> Result<()> {
    if args.is_empty() {
        bail!("Nothing to change. See `hafiz set --help`.");
    }
    config.profile = apply_set(&config.profile, args)?;
    config.save()?;

    let today = Local::now().date_naive();
    let completion = ProjectionCalculator::project(&config.profile, today);
    let hijri = completion
        .estimated_completion_date()
        .and_then(|d| hijri_string(d, config.report.hijri_offset));
    println_colored!(GREEN, "  ✓ Settings saved");
    println!();
    print_projection(&config.profile, &completion, hijri.as_deref());
    println!();
    Ok(())
}

// ─── Page ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PageChange {
    pub from: i32,
    pub to: i32,
    /// Pages recorded as sabak, if any.
    pub logged: Option<f64>,
}

/// Move the current page, clamped to the profile's range, and record a
/// forward move as sabak for `today` unless `no_log`.
///
/// `save` persists the updated config and runs before anything is logged, so
/// a failed save leaves the log untouched.
pub fn apply_page<F>(
    conn: &Connection,
    config: &mut AppConfig,
    page: i32,
    no_log: bool,
    today: NaiveDate,
    save: F,
) -> Result<PageChange>
where
    F: FnOnce(&AppConfig) -> Result<()>,
{
    let settings = &mut config.profile;
    let from = settings.clamp_page(settings.current_page);
    if from != settings.current_page {
        log::warn!(
            "Stored current page {} is out of range, treating it as {}",
            settings.current_page,
            from
        );
    }
    let to = settings.clamp_page(page);
    if to != page {
        log::warn!("Page {} is out of range, using {}", page, to);
    }
    settings.current_page = to;
    save(config)?;

    let delta = to - from;
    let logged = if delta > 0 && !no_log {
        ReviewRepo::log_pages(conn, today, ReviewKind::Sabak, f64::from(delta), None)?;
        Some(f64::from(delta))
    } else {
        None
    };

    Ok(PageChange { from, to, logged })
}

pub fn handle_page(conn: &Connection, config: &mut AppConfig, page: i32, no_log: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let change = apply_page(conn, config, page, no_log, today, AppConfig::save)?;

    match change.logged {
        Some(pages) => println_colored!(
            GREEN,
            "  ✓ Page {} → {}  ·  logged {} sabak pages",
            change.from,
            change.to,
            format_pages(pages)
        ),
        None => println_colored!(GREEN, "  ✓ Current page set to {}", change.to),
    }

    let completion = ProjectionCalculator::project(&config.profile, today);
    if let Some(days) = completion.days_remaining() {
        println_colored!(
            DIM,
            "  {:.1}% complete  ·  {} to go at {}/day",
            completion.progress_percentage,
            format_days(days),
            format_pages(config.profile.daily_goal_pages)
        );
    }
    Ok(())
}

// ─── Log ─────────────────────────────────────────────────────────────────────

/// Check a `log` request and resolve its date, defaulting to `today`.
pub fn validate_log(pages: f64, date: Option<NaiveDate>, today: NaiveDate) -> Result<NaiveDate> {
    if !pages.is_finite() || pages <= 0.0 {
        bail!("Pages must be greater than 0");
    }
    let date = date.unwrap_or(today);
    if date > today {
        bail!("Cannot log pages for a future date ({})", date);
    }
    Ok(date)
}

pub fn handle_log(
    conn: &Connection,
    config: &AppConfig,
    pages: f64,
    kind: ReviewKind,
    date: Option<NaiveDate>,
    note: Option<&str>,
) -> Result<()> {
    let date = validate_log(pages, date, Local::now().date_naive())?;

    ReviewRepo::log_pages(conn, date, kind, pages, note)?;
    let day = ReviewRepo::get_day(conn, date)?;

    let (done, goal) = if kind.is_revision() {
        (day.revision(), config.profile.revision_goal_pages)
    } else {
        (day.sabak, config.profile.daily_goal_pages)
    };
    println_colored!(
        GREEN,
        "  ✓ Logged {} {} pages for {} — {} / {} of goal",
        format_pages(pages),
        kind.display_name(),
        date,
        format_pages(done),
        format_pages(goal)
    );
    let breakdown: Vec<String> = ReviewRepo::get_entries_for_date(conn, date)?
        .iter()
        .map(|e| match &e.note {
            Some(note) => format!("{} {} ({})", e.kind.display_name(), format_pages(e.pages), note),
            None => format!("{} {}", e.kind.display_name(), format_pages(e.pages)),
        })
        .collect();
    println_colored!(DIM, "  {}  ·  {}", date, breakdown.join("  ·  "));
    if kind == ReviewKind::Sabak {
        println_colored!(DIM, "  Tip: `hafiz page <n>` moves your current page");
    }
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(conn: &Connection, config: &AppConfig, weeks: Option<u32>) -> Result<()> {
    let today = Local::now().date_naive();
    let weeks = weeks.unwrap_or(config.report.heatmap_weeks).clamp(1, 52);
    let report = build_report(conn, config, today)?;
    let grid = StatsRepo::get_heatmap(conn, today, weeks)?;
    let target = config.profile.daily_goal_pages + config.profile.revision_goal_pages;

    let sabak_total: f64 = grid.iter().map(|d| d.sabak).sum();
    let revision_total: f64 = grid.iter().map(|d| d.revision()).sum();
    let active_days = grid.iter().filter(|d| d.is_active()).count();

    println!();
    println_colored!(GOLD, "  Statistics");
    println!();
    println_colored!(
        BOLD,
        "  Streak:     {} days current  |  {} days best",
        report.streak.current,
        report.streak.best
    );
    println!(
        "  Last {} weeks: {} active days  ·  {} sabak  ·  {} revision pages",
        weeks,
        active_days,
        format_pages(sabak_total),
        format_pages(revision_total)
    );
    let logged_since_start =
        ReviewRepo::total_for_kind(conn, ReviewKind::Sabak, config.profile.start_date, today)?;
    println!(
        "  Since {}: {} sabak pages logged",
        config.profile.start_date,
        format_pages(logged_since_start)
    );
    print_pace(&report.pace);

    println!();
    println_colored!(DIM, "  Activity  (· none  ░ <50%  ▒ <100%  ▓ goal  █ 150%+ of daily target)");
    println!();
    for line in heatmap_lines(&grid, target) {
        println!("  {}", line);
    }
    println!();
    Ok(())
}

/// One row per weekday, one column per week, oldest column first.
pub fn heatmap_lines(grid: &[DailyActivity], target: f64) -> Vec<String> {
    let rows = grid.len().min(7);
    (0..rows)
        .map(|row| {
            let label = pad_right(&grid[row].date.weekday().to_string(), 4);
            let cells: String = grid
                .iter()
                .skip(row)
                .step_by(7)
                .map(|d| heat_cell(HeatLevel::for_day(d, target)))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{}{}", label, cells)
        })
        .collect()
}

fn heat_cell(level: HeatLevel) -> String {
    match level {
        HeatLevel::None => format!("{}·{}", DIM, RESET),
        HeatLevel::Light => format!("{}░{}", AMBER, RESET),
        HeatLevel::Moderate => format!("{}▒{}", AMBER, RESET),
        HeatLevel::Goal => format!("{}▓{}", GREEN, RESET),
        HeatLevel::Beyond => format!("{}█{}", GREEN, RESET),
    }
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(conn: &Connection, config: &AppConfig, json: bool) -> Result<()> {
    let report = build_report(conn, config, Local::now().date_naive())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_export(&report));
    }
    Ok(())
}

pub fn render_export(report: &Report) -> String {
    let mut out = String::new();
    let p = &report.profile;
    let c = &report.completion;

    out.push_str("# hafiz — Weekly Summary\n");
    out.push_str(&format!("# {}\n\n", report.date));
    out.push_str(&format!("Name:     {}\n", p.name));
    out.push_str(&format!("Started:  {} (page {})\n", p.start_date, p.clamped_start()));
    out.push_str(&format!(
        "Goals:    {} new + {} revision pages/day\n\n",
        format_pages(p.daily_goal_pages),
        format_pages(p.revision_goal_pages)
    ));

    out.push_str("## Last 7 days\n");
    for day in &report.week {
        out.push_str(&format!(
            "  {}  {}  sabak {:>4}  dour {:>4}  manzil {:>4}\n",
            day.date,
            progress_bar(day.sabak / p.daily_goal_pages.max(f64::MIN_POSITIVE), 5),
            format_pages(day.sabak),
            format_pages(day.dour),
            format_pages(day.manzil)
        ));
    }

    out.push_str("\n## Progress\n");
    out.push_str(&format!(
        "  Page:       {} / {} ({:.1}%)\n",
        p.clamped_current(),
        p.clamped_total(),
        c.progress_percentage
    ));
    out.push_str(&format!("  Juz:        {} / 30\n", c.juz_completed));
    out.push_str(&format!("  Remaining:  {} pages\n", c.pages_remaining));
    let forecast = match (c.days_remaining(), c.estimated_completion_date()) {
        (Some(0), _) => "complete".to_string(),
        (Some(days), Some(date)) => format!("{} ({})", date, format_days(days)),
        _ => "none at this pace".to_string(),
    };
    out.push_str(&format!("  Khatam:     {}\n", forecast));
    out.push_str(&format!(
        "  Streak:     {} days (best: {})\n",
        report.streak.current, report.streak.best
    ));
    out
}
