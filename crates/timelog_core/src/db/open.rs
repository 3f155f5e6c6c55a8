//! Connection setup for the timelog database.
//!
//! # Invariants
//! - Connections leave here with foreign keys enforced (link rows cascade
//!   with their contact or project) and the schema fully migrated.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// How long a writer waits on another request's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if needed) the database file at `path`.
///
/// The web layer opens one connection per request, so the happy path logs at
/// `debug` only.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    let result = Connection::open(path)
        .map_err(Into::into)
        .and_then(prepare);
    report(&path.display().to_string(), started_at, &result);
    result
}

/// Opens a private in-memory database, used by tests and tooling.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = Connection::open_in_memory()
        .map_err(Into::into)
        .and_then(prepare);
    report(":memory:", started_at, &result);
    result
}

fn prepare(mut conn: Connection) -> DbResult<Connection> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

fn report(target: &str, started_at: Instant, result: &DbResult<Connection>) {
    let elapsed_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => debug!(
            "event=db_open module=db status=ok target={target} duration_ms={elapsed_ms}"
        ),
        Err(err) => error!(
            "event=db_open module=db status=error target={target} duration_ms={elapsed_ms} error={err}"
        ),
    }
}
