use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use rusqlite::Connection;

use crate::cli::args::parse_date;
use crate::config::AppConfig;
use crate::db::repository::MetaRepo;
use crate::models::settings::MUSHAF_PAGES;
use crate::models::UserSettings;
use crate::projection::{Forecast, ProjectionCalculator};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::utils::format::{format_days, format_pages, progress_bar};

/// Daily sabak targets offered in the goal list.
const GOAL_PRESETS: &[f64] = &[0.5, 1.0, 2.0, 3.0, 5.0, 10.0];

// ─── Wizard steps ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Welcome,
    Name,
    TotalPages,
    StartPage,
    StartDate,
    CurrentPage,
    DailyGoal,
    RevisionGoal,
    Confirm,
}

// ─── Wizard state ─────────────────────────────────────────────────────────────

struct SetupWizard {
    step: Step,
    input: String,
    error: Option<String>,
    list_state: ListState,
    goal_options: Vec<f64>,
    today: NaiveDate,

    // Collected values
    profile: UserSettings,
    goal_idx: usize,

    should_quit: bool,
    confirmed: bool,
}

impl SetupWizard {
    fn new(existing: &AppConfig, today: NaiveDate) -> Self {
        let profile = existing.profile.clone();

        let mut goal_options = GOAL_PRESETS.to_vec();
        let current_goal = profile.daily_goal_pages;
        if current_goal.is_finite()
            && current_goal > 0.0
            && !goal_options.iter().any(|g| *g == current_goal)
        {
            goal_options.push(current_goal);
            goal_options.sort_by(|a, b| a.total_cmp(b));
        }
        let goal_idx = goal_options
            .iter()
            .position(|g| *g == current_goal)
            .unwrap_or(2);

        let mut list_state = ListState::default();
        list_state.select(Some(goal_idx));

        Self {
            step: Step::Welcome,
            input: String::new(),
            error: None,
            list_state,
            goal_options,
            today,
            profile,
            goal_idx,
            should_quit: false,
            confirmed: false,
        }
    }

    fn step_number(&self) -> usize {
        match self.step {
            Step::Welcome => 0,
            Step::Name => 1,
            Step::TotalPages => 2,
            Step::StartPage => 3,
            Step::StartDate => 4,
            Step::CurrentPage => 5,
            Step::DailyGoal => 6,
            Step::RevisionGoal => 7,
            Step::Confirm => 8,
        }
    }

    const TOTAL_STEPS: usize = 8;

    fn advance(&mut self) {
        self.error = None;
        self.step = match self.step {
            Step::Welcome => Step::Name,
            Step::Name => Step::TotalPages,
            Step::TotalPages => Step::StartPage,
            Step::StartPage => Step::StartDate,
            Step::StartDate => Step::CurrentPage,
            Step::CurrentPage => Step::DailyGoal,
            Step::DailyGoal => Step::RevisionGoal,
            Step::RevisionGoal => Step::Confirm,
            Step::Confirm => {
                self.confirmed = true;
                Step::Confirm
            }
        };
        self.input = self.current_value();
    }

    fn go_back(&mut self) {
        self.error = None;
        self.step = match self.step {
            Step::Welcome => {
                self.should_quit = true;
                Step::Welcome
            }
            Step::Name => Step::Welcome,
            Step::TotalPages => Step::Name,
            Step::StartPage => Step::TotalPages,
            Step::StartDate => Step::StartPage,
            Step::CurrentPage => Step::StartDate,
            Step::DailyGoal => Step::CurrentPage,
            Step::RevisionGoal => Step::DailyGoal,
            Step::Confirm => Step::RevisionGoal,
        };
        self.input = self.current_value();
    }

    /// Pre-filled input for the current text step.
    fn current_value(&self) -> String {
        match self.step {
            Step::Name => self.profile.name.clone(),
            Step::TotalPages => self.profile.total_pages.to_string(),
            Step::StartPage => self.profile.start_page.to_string(),
            Step::StartDate => self.profile.start_date.format("%Y-%m-%d").to_string(),
            Step::CurrentPage => self.profile.current_page.to_string(),
            Step::RevisionGoal => format_pages(self.profile.revision_goal_pages),
            _ => String::new(),
        }
    }

    fn default_value(&self) -> String {
        match self.step {
            Step::Name => "Hafiz".to_string(),
            Step::TotalPages => MUSHAF_PAGES.to_string(),
            Step::StartPage => "1".to_string(),
            Step::StartDate => self.today.format("%Y-%m-%d").to_string(),
            Step::CurrentPage => self.profile.start_page.to_string(),
            Step::RevisionGoal => "5".to_string(),
            _ => self.input.clone(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match &self.step {
            Step::Welcome => {
                if key.code == KeyCode::Esc {
                    self.should_quit = true;
                } else {
                    self.advance();
                }
            }

            Step::DailyGoal => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    if self.goal_idx > 0 {
                        self.goal_idx -= 1;
                        self.list_state.select(Some(self.goal_idx));
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if self.goal_idx + 1 < self.goal_options.len() {
                        self.goal_idx += 1;
                        self.list_state.select(Some(self.goal_idx));
                    }
                }
                KeyCode::Enter => {
                    self.profile.daily_goal_pages = self.goal_options[self.goal_idx];
                    self.advance();
                }
                KeyCode::Esc => self.go_back(),
                _ => {}
            },

            Step::Confirm => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    match self.profile.validate() {
                        Ok(()) => self.confirmed = true,
                        Err(e) => self.error = Some(e.to_string()),
                    }
                }
                KeyCode::Esc | KeyCode::Char('n') => self.go_back(),
                _ => {}
            },

            _ => self.handle_text_input(key),
        }
    }

    fn handle_text_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => {
                let val = self.input.trim().to_string();
                match self.commit_text_input(&val) {
                    Ok(()) => self.advance(),
                    Err(e) => self.error = Some(e),
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
            }
            KeyCode::Tab => {
                self.input = self.default_value();
                self.error = None;
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.error = None;
            }
            _ => {}
        }
    }

    /// Validate `val` for the current step and store it.
    fn commit_text_input(&mut self, val: &str) -> std::result::Result<(), String> {
        let p = &mut self.profile;
        match self.step {
            Step::Name => {
                if val.is_empty() {
                    return Err("Please enter a name".to_string());
                }
                p.name = val.to_string();
            }
            Step::TotalPages => {
                let total = parse_int(val, "e.g. 604")?;
                if total < 1 {
                    return Err("Total pages must be at least 1".to_string());
                }
                p.total_pages = total;
                p.start_page = p.start_page.clamp(1, total);
                p.current_page = p.current_page.clamp(p.start_page, total);
            }
            Step::StartPage => {
                let start = parse_int(val, "e.g. 1")?;
                if start < 1 || start > p.total_pages {
                    return Err(format!("Start page must be between 1 and {}", p.total_pages));
                }
                p.start_page = start;
                p.current_page = p.current_page.clamp(start, p.total_pages);
            }
            Step::StartDate => {
                let date = parse_date(val)?;
                if date > self.today {
                    return Err("Start date can't be in the future".to_string());
                }
                p.start_date = date;
            }
            Step::CurrentPage => {
                let current = parse_int(val, "e.g. 45")?;
                if current < p.start_page || current > p.total_pages {
                    return Err(format!(
                        "Current page must be between {} and {}",
                        p.start_page, p.total_pages
                    ));
                }
                p.current_page = current;
            }
            Step::RevisionGoal => {
                let goal: f64 = val
                    .parse()
                    .map_err(|_| format!("'{}' is not a number of pages", val))?;
                if !goal.is_finite() || goal < 0.0 {
                    return Err("Revision goal can't be negative".to_string());
                }
                p.revision_goal_pages = goal;
            }
            _ => {}
        }
        Ok(())
    }

    fn build_config(&self, existing: &AppConfig) -> AppConfig {
        let mut config = existing.clone();
        config.profile = self.profile.clone();
        config
    }
}

fn parse_int(val: &str, example: &str) -> std::result::Result<i32, String> {
    val.parse::<i32>()
        .map_err(|_| format!("Enter a whole number ({})", example))
}

// ─── Rendering ────────────────────────────────────────────────────────────────

fn draw(frame: &mut Frame, wizard: &mut SetupWizard) {
    let area = frame.area();

    // Dark background
    frame.render_widget(Block::default().style(theme::screen()), area);

    // Center the wizard box
    let vchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(26),
            Constraint::Min(0),
        ])
        .split(area);

    let hchunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(64),
            Constraint::Min(0),
        ])
        .split(vchunks[1]);

    let box_area = hchunks[1];
    frame.render_widget(Clear, box_area);

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent())
        .style(theme::panel())
        .title(Span::styled(
            "  حافظ  hafiz  —  Setup  ",
            theme::heading(),
        ))
        .title_alignment(Alignment::Center);

    frame.render_widget(outer_block, box_area);

    let inner = Rect {
        x: box_area.x + 2,
        y: box_area.y + 1,
        width: box_area.width.saturating_sub(4),
        height: box_area.height.saturating_sub(2),
    };

    match wizard.step {
        Step::Welcome => draw_welcome(frame, inner),
        Step::DailyGoal => draw_goal_list(frame, inner, wizard),
        Step::Confirm => draw_confirm(frame, inner, wizard),
        _ => draw_text_step(frame, inner, wizard),
    }

    draw_progress(frame, inner, wizard.step_number(), SetupWizard::TOTAL_STEPS);
}

fn draw_progress(frame: &mut Frame, area: Rect, current: usize, total: usize) {
    let mut spans = vec![Span::styled("  ", theme::muted())];
    for i in 1..=total {
        if i < current {
            spans.push(Span::styled("● ", theme::done()));
        } else if i == current {
            spans.push(Span::styled("◉ ", theme::accent()));
        } else {
            spans.push(Span::styled("○ ", theme::muted()));
        }
    }
    let para = Paragraph::new(Line::from(spans));
    let progress_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    frame.render_widget(para, progress_area);
}

fn content_area(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + 2,
        width: area.width,
        height: area.height.saturating_sub(2),
    }
}

fn draw_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "بِسۡمِ ٱللَّهِ ٱلرَّحۡمَٰنِ ٱلرَّحِيمِ",
            theme::heading(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to hafiz",
            theme::value(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "A quiet terminal companion for your hifz journey.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("This wizard will configure:", theme::muted())),
        Line::from(vec![
            Span::styled("  ●  ", theme::accent()),
            Span::styled("Your mushaf and where you started", theme::muted()),
        ]),
        Line::from(vec![
            Span::styled("  ●  ", theme::accent()),
            Span::styled("The page you have reached", theme::muted()),
        ]),
        Line::from(vec![
            Span::styled("  ●  ", theme::accent()),
            Span::styled("Daily sabak and revision goals", theme::muted()),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press  Enter  to begin  ·  Esc  to cancel",
            theme::muted(),
        )),
    ];

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, content_area(area));
}

fn draw_text_step(frame: &mut Frame, area: Rect, wizard: &SetupWizard) {
    let (title, subtitle, hint) = match wizard.step {
        Step::Name => (
            "Your Name",
            "Shown at the top of your reports",
            "e.g.  Aisha,  Yusuf  ·  [Tab] to reset",
        ),
        Step::TotalPages => (
            "Total Pages",
            "How many pages your mushaf has",
            "604  for the standard Madani mushaf  ·  [Tab] to reset",
        ),
        Step::StartPage => (
            "Start Page",
            "The page your memorization began from",
            "e.g.  1  ·  [Tab] to reset",
        ),
        Step::StartDate => (
            "Start Date",
            "When you started memorizing (YYYY-MM-DD)",
            "e.g.  2026-01-15  ·  [Tab] for today",
        ),
        Step::CurrentPage => (
            "Current Page",
            "The page you have memorized up to",
            "e.g.  45  ·  [Tab] to reset",
        ),
        Step::RevisionGoal => (
            "Revision Goal",
            "Pages of dour + manzil to revise each day",
            "e.g.  5  or  20  ·  0 to skip",
        ),
        _ => ("", "", ""),
    };

    let cursor = if wizard.input.len() < 40 { "█" } else { "" };

    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(title, theme::heading())),
        Line::from(""),
        Line::from(Span::styled(subtitle, theme::muted())),
        Line::from(""),
        Line::from(""),
    ];

    let input_display = format!("  {}{}  ", wizard.input, cursor);
    let input_width = area.width.saturating_sub(8) as usize;
    let padded = format!("{:<width$}", input_display, width = input_width);

    let input_style = theme::input(wizard.error.is_some());

    lines.push(Line::from(Span::styled(padded, input_style)));
    lines.push(Line::from(""));

    if let Some(err) = &wizard.error {
        lines.push(Line::from(Span::styled(format!("  ✗  {}", err), theme::error())));
    } else {
        lines.push(Line::from(Span::styled(hint, theme::muted())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter  confirm   ·   Esc  back",
        theme::muted(),
    )));

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, content_area(area));
}

fn draw_goal_list(frame: &mut Frame, area: Rect, wizard: &mut SetupWizard) {
    let header_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Daily Sabak Goal",
            theme::heading(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "How many new pages you aim to memorize each day",
            theme::muted(),
        )),
        Line::from(""),
    ];

    let header_para = Paragraph::new(header_lines).alignment(Alignment::Center);
    let header_area = Rect {
        x: area.x,
        y: area.y + 2,
        width: area.width,
        height: 5,
    };
    frame.render_widget(header_para, header_area);

    let list_area = Rect {
        x: area.x + 2,
        y: area.y + 8,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(12),
    };

    let items: Vec<ListItem> = wizard
        .goal_options
        .iter()
        .enumerate()
        .map(|(i, goal)| {
            let completion = ProjectionCalculator::project_at_pace(&wizard.profile, *goal, wizard.today);
            let outlook = match completion.days_remaining() {
                Some(days) => format!("  ·  khatam in {}", format_days(days)),
                None => String::new(),
            };
            let label = format!("{} pages/day{}", format_pages(*goal), outlook);
            let line = if i == wizard.goal_idx {
                Line::from(vec![
                    Span::styled("  ◉  ", theme::accent()),
                    Span::styled(label, theme::heading()),
                ])
            } else {
                Line::from(vec![
                    Span::styled("  ○  ", theme::muted()),
                    Span::styled(label, theme::muted()),
                ])
            };
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).style(theme::panel());
    frame.render_stateful_widget(list, list_area, &mut wizard.list_state);

    let footer = Paragraph::new(Line::from(Span::styled(
        "↑↓  navigate   ·   Enter  select   ·   Esc  back",
        theme::muted(),
    )))
    .alignment(Alignment::Center);
    let footer_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(3),
        width: area.width,
        height: 1,
    };
    frame.render_widget(footer, footer_area);
}

fn draw_confirm(frame: &mut Frame, area: Rect, wizard: &SetupWizard) {
    let p = &wizard.profile;
    let completion = ProjectionCalculator::project(p, wizard.today);
    let forecast = match completion.forecast {
        Forecast::Scheduled { .. } if completion.is_complete() => "Khatam complete".to_string(),
        Forecast::Scheduled {
            days_remaining,
            completion_date,
        } => format!("{}  ({})", completion_date.format("%d %b %Y"), format_days(days_remaining)),
        Forecast::Unbounded => "no forecast".to_string(),
    };

    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, theme::muted()),
            Span::styled(value, theme::value()),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Confirm Settings", theme::heading())),
        Line::from(""),
        row("  Name        ", p.name.clone()),
        row("  Mushaf      ", format!("{} pages from page {}", p.total_pages, p.start_page)),
        row("  Started     ", p.start_date.format("%d %b %Y").to_string()),
        row("  Current     ", format!("page {}", p.current_page)),
        row(
            "  Goals       ",
            format!(
                "{} new + {} revision pages/day",
                format_pages(p.daily_goal_pages),
                format_pages(p.revision_goal_pages)
            ),
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled(progress_bar(completion.progress_percentage / 100.0, 20), theme::done()),
            Span::styled(format!("  {:.1}%", completion.progress_percentage), theme::value()),
        ]),
        row("  Juz         ", format!("{} / 30", completion.juz_completed)),
        Line::from(vec![
            Span::styled("  Khatam      ", theme::muted()),
            Span::styled(forecast, theme::outlook()),
        ]),
        Line::from(""),
    ];

    if let Some(err) = &wizard.error {
        lines.push(Line::from(Span::styled(format!("  ✗  {}", err), theme::error())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter  save   ·   Esc  go back",
        theme::muted(),
    )));

    let para = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(para, content_area(area));
}

// ─── Public entry point ──────────────────────────────────────────────────────

pub fn run_setup_tui(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    let mut wizard = SetupWizard::new(config, Local::now().date_naive());
    let mut terminal = ratatui::init();
    let events = EventHandler::new(100);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| draw(frame, &mut wizard))?;

            match events.next()? {
                Event::Key(key) => {
                    wizard.handle_key(key);
                    if wizard.should_quit {
                        log::info!("Setup cancelled");
                        return Ok(());
                    }
                    if wizard.confirmed {
                        *config = wizard.build_config(config);
                        config.save()?;
                        MetaRepo::set(conn, "setup_done", "1")?;
                        return Ok(());
                    }
                }
                Event::Tick => {}
            }
        }
    })();

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn type_and_enter(wizard: &mut SetupWizard, text: &str) {
        for _ in 0..wizard.input.chars().count() {
            wizard.handle_key(key(KeyCode::Backspace));
        }
        for c in text.chars() {
            wizard.handle_key(key(KeyCode::Char(c)));
        }
        wizard.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn walks_every_step_and_builds_config() {
        let config = AppConfig::default();
        let mut wizard = SetupWizard::new(&config, today());

        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.step, Step::Name);
        type_and_enter(&mut wizard, "Aisha");
        type_and_enter(&mut wizard, "604");
        type_and_enter(&mut wizard, "1");
        type_and_enter(&mut wizard, "2026-09-01");
        type_and_enter(&mut wizard, "45");
        assert_eq!(wizard.step, Step::DailyGoal);
        wizard.handle_key(key(KeyCode::Down));
        wizard.handle_key(key(KeyCode::Enter));
        type_and_enter(&mut wizard, "10");
        assert_eq!(wizard.step, Step::Confirm);
        wizard.handle_key(key(KeyCode::Enter));
        assert!(wizard.confirmed);

        let built = wizard.build_config(&config);
        assert_eq!(built.profile.name, "Aisha");
        assert_eq!(built.profile.current_page, 45);
        assert_eq!(built.profile.start_date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        assert_eq!(built.profile.daily_goal_pages, 3.0);
        assert_eq!(built.profile.revision_goal_pages, 10.0);
        assert_eq!(built.report, config.report);
    }

    #[test]
    fn invalid_input_stays_on_step() {
        let mut wizard = SetupWizard::new(&AppConfig::default(), today());
        wizard.handle_key(key(KeyCode::Enter));
        type_and_enter(&mut wizard, "Aisha");

        type_and_enter(&mut wizard, "lots");
        assert_eq!(wizard.step, Step::TotalPages);
        assert!(wizard.error.is_some());

        type_and_enter(&mut wizard, "0");
        assert_eq!(wizard.step, Step::TotalPages);

        type_and_enter(&mut wizard, "604");
        type_and_enter(&mut wizard, "700");
        assert_eq!(wizard.step, Step::StartPage);

        type_and_enter(&mut wizard, "1");
        type_and_enter(&mut wizard, "2030-01-01");
        assert_eq!(wizard.step, Step::StartDate);
        assert_eq!(wizard.error.as_deref(), Some("Start date can't be in the future"));
    }

    #[test]
    fn tab_restores_default() {
        let mut wizard = SetupWizard::new(&AppConfig::default(), today());
        wizard.handle_key(key(KeyCode::Enter));
        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.step, Step::TotalPages);
        wizard.handle_key(key(KeyCode::Backspace));
        wizard.handle_key(key(KeyCode::Tab));
        assert_eq!(wizard.input, "604");
    }

    #[test]
    fn escape_goes_back_then_quits() {
        let mut wizard = SetupWizard::new(&AppConfig::default(), today());
        wizard.handle_key(key(KeyCode::Enter));
        wizard.handle_key(key(KeyCode::Esc));
        assert_eq!(wizard.step, Step::Welcome);
        assert!(!wizard.should_quit);
        wizard.handle_key(key(KeyCode::Esc));
        assert!(wizard.should_quit);
    }

    #[test]
    fn custom_goal_is_offered() {
        let mut config = AppConfig::default();
        config.profile.daily_goal_pages = 1.5;
        let wizard = SetupWizard::new(&config, today());
        assert_eq!(wizard.goal_options[wizard.goal_idx], 1.5);
        assert_eq!(wizard.goal_options.len(), GOAL_PRESETS.len() + 1);
    }

    #[test]
    fn shrinking_total_clamps_pages() {
        let mut config = AppConfig::default();
        config.profile.current_page = 500;
        let mut wizard = SetupWizard::new(&config, today());
        wizard.handle_key(key(KeyCode::Enter));
        type_and_enter(&mut wizard, "Aisha");
        type_and_enter(&mut wizard, "300");
        assert_eq!(wizard.profile.current_page, 300);
    }
}
