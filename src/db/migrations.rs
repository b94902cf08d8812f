use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS review_log (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL,
            kind        TEXT NOT NULL CHECK(kind IN ('sabak','dour','manzil')),
            pages       REAL NOT NULL DEFAULT 0,
            note        TEXT,
            created_at  TEXT DEFAULT (datetime('now')),
            UNIQUE(date, kind)
        );

        CREATE INDEX IF NOT EXISTS idx_review_log_date ON review_log(date);

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;

    log::debug!("Database migrations applied");
    Ok(())
}
