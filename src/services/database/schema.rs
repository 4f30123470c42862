use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    run_settings_migrations(conn)?;
    insert_default_settings(conn)?;
    create_working_hours_table(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            time_format TEXT NOT NULL DEFAULT '12h',
            hour_duration INTEGER NOT NULL DEFAULT 120,
            step_minutes INTEGER NOT NULL DEFAULT 15,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    Ok(())
}

fn run_settings_migrations(conn: &Connection) -> Result<()> {
    ensure_column(
        conn,
        "settings",
        "min_resize",
        "ALTER TABLE settings ADD COLUMN min_resize INTEGER NOT NULL DEFAULT 4",
    )?;

    Ok(())
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (id, time_format, hour_duration, step_minutes, min_resize)
         VALUES (1, '12h', 120, 15, 4)",
        [],
    )
    .context("Failed to insert default settings")?;

    Ok(())
}

fn create_working_hours_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS working_hours (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            location_code TEXT NOT NULL,
            start_datetime TEXT NOT NULL,
            end_datetime TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create working_hours table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_working_hours_location
         ON working_hours(location_code, start_datetime)",
        [],
    )
    .context("Failed to create working_hours index")?;

    Ok(())
}

/// Applies `ddl` when `table` has no column called `column` yet.
fn ensure_column(conn: &Connection, table: &str, column: &str, ddl: &str) -> Result<()> {
    let present: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            [table, column],
            |row| row.get(0),
        )
        .with_context(|| format!("Failed to inspect columns of {}", table))?;

    if present == 0 {
        conn.execute(ddl, [])
            .with_context(|| format!("Failed to add {}.{}", table, column))?;
        log::info!("Migrated {}: added column {}", table, column);
    }

    Ok(())
}
