use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::models::ReviewKind;

#[derive(Parser, Debug)]
#[command(name = "hafiz", version, author, about = "A terminal companion for tracking Quran memorization progress")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Settings wizard (name, pages, start date, daily goals)
    Setup {
        /// Reset existing configuration
        #[arg(long)]
        reset: bool,
    },
    /// Show progress and projected completion date
    Status {
        /// Print machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Change profile settings without the wizard
    Set(SetArgs),
    /// Move to a new current page
    Page {
        /// The page you have memorized up to
        page: i32,
        /// Don't record the advance as today's sabak
        #[arg(long)]
        no_log: bool,
    },
    /// Log pages memorized or revised
    Log {
        /// Number of pages
        pages: f64,
        /// Kind: sabak (new), dour (recent review) or manzil (long review)
        #[arg(long, short, default_value = "sabak", value_parser = parse_kind)]
        kind: ReviewKind,
        /// Date to log against (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Free-form note, e.g. the surah
        #[arg(long)]
        note: Option<String>,
    },
    /// Show streak, velocity and activity heatmap
    Stats {
        /// Weeks of heatmap to show (defaults to config)
        #[arg(long)]
        weeks: Option<u32>,
    },
    /// Export a weekly summary to stdout
    Export {
        /// Print machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct SetArgs {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,
    /// Pages in your mushaf
    #[arg(long)]
    pub total_pages: Option<i32>,
    /// Page memorization started from
    #[arg(long)]
    pub start_page: Option<i32>,
    /// Date memorization started (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,
    /// Page memorized up to
    #[arg(long)]
    pub current_page: Option<i32>,
    /// New pages per day
    #[arg(long)]
    pub daily_goal: Option<f64>,
    /// Revision pages per day
    #[arg(long)]
    pub revision_goal: Option<f64>,
}

impl SetArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.total_pages.is_none()
            && self.start_page.is_none()
            && self.start_date.is_none()
            && self.current_page.is_none()
            && self.daily_goal.is_none()
            && self.revision_goal.is_none()
    }
}

fn parse_kind(s: &str) -> Result<ReviewKind, String> {
    s.parse::<ReviewKind>().map_err(|e| e.to_string())
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a date in YYYY-MM-DD form", s))
}
