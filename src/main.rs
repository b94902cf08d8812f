mod cli;
mod config;
mod db;
mod models;
mod projection;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::MetaRepo;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    log::debug!("Opened database at {:?}", db_path);

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Setup { reset }) => {
            handlers::handle_setup(&conn, &mut config, reset)?;
        }

        // `set` is itself a way of configuring, so it skips the wizard
        Some(Commands::Set(args)) => {
            handlers::handle_set(&mut config, &args)?;
            MetaRepo::set(&conn, "setup_done", "1")?;
        }

        Some(cmd) => {
            ensure_setup(&conn, &mut config)?;
            match cmd {
                Commands::Status { json } => {
                    handlers::handle_status(&conn, &config, json)?;
                }
                Commands::Page { page, no_log } => {
                    handlers::handle_page(&conn, &mut config, page, no_log)?;
                }
                Commands::Log {
                    pages,
                    kind,
                    date,
                    note,
                } => {
                    handlers::handle_log(&conn, &config, pages, kind, date, note.as_deref())?;
                }
                Commands::Stats { weeks } => {
                    handlers::handle_stats(&conn, &config, weeks)?;
                }
                Commands::Export { json } => {
                    handlers::handle_export(&conn, &config, json)?;
                }
                Commands::Setup { .. } | Commands::Set(_) => unreachable!(),
            }
        }

        // No subcommand → status
        None => {
            ensure_setup(&conn, &mut config)?;
            handlers::handle_status(&conn, &config, false)?;
        }
    }

    Ok(())
}

/// Check if setup has been done; if not, run the wizard automatically.
fn ensure_setup(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    let done = MetaRepo::get(conn, "setup_done")?;
    if done.as_deref() != Some("1") {
        eprintln!("No profile found. Running setup...");
        eprintln!();
        handlers::handle_setup(conn, config, false)?;
    }
    Ok(())
}
