use rusqlite::{Connection, OptionalExtension, Result, params};

/// Schema steps, applied in order and recorded in the `log` table.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "create_activities",
        "Created activities table",
        r#"
        CREATE TABLE IF NOT EXISTS activities (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            kind        TEXT NOT NULL CHECK (kind IN ('login','logout')),
            date        TEXT NOT NULL,          -- YYYY-MM-DD
            time        TEXT NOT NULL,          -- HH:MM:SS
            location    TEXT NOT NULL DEFAULT '',
            lat         REAL,
            lng         REAL,
            photo       TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL           -- ISO 8601 timestamp
        );
        "#,
    ),
    (
        "index_activities",
        "Added activities indexes",
        r#"
        CREATE INDEX IF NOT EXISTS idx_activities_date_time ON activities(date, time);
        CREATE INDEX IF NOT EXISTS idx_activities_date_kind ON activities(date, kind);
        "#,
    ),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, name: &str) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM log
             WHERE operation = 'migration_applied' AND target = ?1
             LIMIT 1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Public entry point: run all pending migrations.
/// Returns the number of steps applied.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (name, message, sql) in MIGRATIONS {
        if is_applied(conn, name)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (?1, 'migration_applied', ?2, ?3)",
            params![chrono::Local::now().to_rfc3339(), name, message],
        )?;
        tx.commit()?;

        tracing::debug!(migration = name, "migration applied");
        applied += 1;
    }

    Ok(applied)
}
