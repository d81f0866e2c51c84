use rusqlite::Connection;
use tracing::info;

use super::DatabaseError;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Running SQLite migrations");

    create_correlations_table(conn)?;
    create_quantity_samples_table(conn)?;
    create_quantity_samples_index(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the correlations table
fn create_correlations_table(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating correlations table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS correlations (
            id TEXT PRIMARY KEY,
            kind TEXT NOT NULL,
            start_us INTEGER NOT NULL,
            end_us INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| DatabaseError::Migration(format!("Failed to create correlations table: {}", e)))?;

    Ok(())
}

/// Create the quantity samples table. `seq` keeps insertion order for ties.
fn create_quantity_samples_table(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating quantity_samples table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS quantity_samples (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            correlation_id TEXT REFERENCES correlations (id),
            category TEXT NOT NULL,
            value_mmhg REAL NOT NULL,
            start_us INTEGER NOT NULL,
            end_us INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| {
        DatabaseError::Migration(format!("Failed to create quantity_samples table: {}", e))
    })?;

    Ok(())
}

/// Index backing most-recent-first lookups per category
fn create_quantity_samples_index(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating index on category and start time");

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_quantity_samples_category_start
        ON quantity_samples (category, start_us DESC)",
        [],
    )
    .map_err(|e| DatabaseError::Migration(format!("Failed to create index: {}", e)))?;

    Ok(())
}
