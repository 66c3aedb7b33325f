use std::fs;
use std::path::Path;

use anyhow::Context;
use rusqlite::Connection;

/// Apply every `migrations/*.sql` file that has not run yet, in file
/// name order, recording each in `_migrations`.
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create migrations table")?;

    let dir = Path::new("migrations");
    if !dir.exists() {
        tracing::warn!("migrations directory not found, skipping");
        return Ok(());
    }

    let mut names: Vec<String> = fs::read_dir(dir)
        .context("failed to read migrations directory")?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(".sql"))
        .collect();
    names.sort();

    for name in names {
        if already_applied(conn, &name)? {
            continue;
        }

        let sql = fs::read_to_string(dir.join(&name))
            .with_context(|| format!("failed to read migration file: {name}"))?;
        conn.execute_batch(&sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;
        conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [&name])
            .with_context(|| format!("failed to record migration: {name}"))?;

        tracing::info!("applied migration: {name}");
    }

    Ok(())
}

fn already_applied(conn: &Connection, name: &str) -> anyhow::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
        [name],
        |row| row.get(0),
    )
    .context("failed to check migration status")
}
