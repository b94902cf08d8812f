use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pages in the standard Madani mushaf.
pub const MUSHAF_PAGES: i32 = 604;

fn default_name() -> String {
    "Hafiz".to_string()
}
fn default_total_pages() -> i32 {
    MUSHAF_PAGES
}
fn default_start_page() -> i32 {
    1
}
fn default_start_date() -> NaiveDate {
    Local::now().date_naive()
}
fn default_current_page() -> i32 {
    1
}
fn default_daily_goal() -> f64 {
    2.0
}
fn default_revision_goal() -> f64 {
    5.0
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("total pages must be at least 1 (got {0})")]
    TotalPages(i32),
    #[error("start page {start} must be between 1 and {total}")]
    StartPage { start: i32, total: i32 },
    #[error("current page {current} must be between {start} and {total}")]
    CurrentPage { current: i32, start: i32, total: i32 },
    #[error("daily goal must be a non-negative number of pages (got {0})")]
    DailyGoal(f64),
    #[error("revision goal must be a non-negative number of pages (got {0})")]
    RevisionGoal(f64),
}

/// A memorizer's profile and targets.
///
/// Values come straight from the config file or the settings form, so they may
/// be out of range. The calculator works from the `clamped_*` accessors and
/// never rejects a profile; `validate` is for the places that accept input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_total_pages")]
    pub total_pages: i32,
    #[serde(default = "default_start_page")]
    pub start_page: i32,
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    #[serde(default = "default_current_page")]
    pub current_page: i32,
    #[serde(default = "default_daily_goal")]
    pub daily_goal_pages: f64,
    #[serde(default = "default_revision_goal")]
    pub revision_goal_pages: f64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            total_pages: default_total_pages(),
            start_page: default_start_page(),
            start_date: default_start_date(),
            current_page: default_current_page(),
            daily_goal_pages: default_daily_goal(),
            revision_goal_pages: default_revision_goal(),
        }
    }
}

impl UserSettings {
    /// Total pages, never below 1.
    pub fn clamped_total(&self) -> i32 {
        self.total_pages.max(1)
    }

    /// Start page within `[1, total]`.
    pub fn clamped_start(&self) -> i32 {
        self.start_page.clamp(1, self.clamped_total())
    }

    /// Current page within `[0, total]`.
    pub fn clamped_current(&self) -> i32 {
        self.current_page.clamp(0, self.clamped_total())
    }

    /// Clamp a requested page into `[start, total]`, the range `page` accepts.
    pub fn clamp_page(&self, page: i32) -> i32 {
        page.clamp(self.clamped_start(), self.clamped_total())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.name.trim().is_empty() {
            return Err(SettingsError::EmptyName);
        }
        if self.total_pages < 1 {
            return Err(SettingsError::TotalPages(self.total_pages));
        }
        if self.start_page < 1 || self.start_page > self.total_pages {
            return Err(SettingsError::StartPage {
                start: self.start_page,
                total: self.total_pages,
            });
        }
        if self.current_page < self.start_page || self.current_page > self.total_pages {
            return Err(SettingsError::CurrentPage {
                current: self.current_page,
                start: self.start_page,
                total: self.total_pages,
            });
        }
        if !self.daily_goal_pages.is_finite() || self.daily_goal_pages < 0.0 {
            return Err(SettingsError::DailyGoal(self.daily_goal_pages));
        }
        if !self.revision_goal_pages.is_finite() || self.revision_goal_pages < 0.0 {
            return Err(SettingsError::RevisionGoal(self.revision_goal_pages));
        }
        Ok(())
    }
}
