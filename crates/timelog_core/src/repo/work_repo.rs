//! Work entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `work` rows joined with their project's name/client.
//! - Tolerate legacy row shapes (timestamped dates, text hours) on read.
//!
//! # Invariants
//! - Lists are ordered by `(work_date, id)` ascending, the order the activity
//!   log aggregation depends on.
//! - Date bounds in `WorkListQuery` are inclusive string comparisons on
//!   `YYYY-MM-DD` text.

use super::{bool_to_int, ensure_connection_ready, RepoError, RepoResult};
use crate::model::project::ProjectId;
use crate::model::work::{WorkEntry, WorkId};
use log::warn;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const WORK_SELECT_SQL: &str = "SELECT
    w.id AS id,
    w.project_id AS project_id,
    w.work_date AS work_date,
    w.hours AS hours,
    w.billable AS billable,
    w.description AS description,
    p.name AS project_name,
    p.client AS client
FROM work w
LEFT JOIN project p ON p.id = w.project_id";

const WORK_DATE_LEN: usize = 10;

/// Filter options for listing work entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkListQuery {
    /// Inclusive lower date bound (`YYYY-MM-DD`).
    pub from: Option<String>,
    /// Inclusive upper date bound (`YYYY-MM-DD`).
    pub to: Option<String>,
    pub project_id: Option<ProjectId>,
}

impl WorkListQuery {
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            project_id: None,
        }
    }

    pub fn since(from: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            ..Self::default()
        }
    }

    pub fn for_project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
            ..Self::default()
        }
    }
}

/// Repository interface for work entry CRUD operations.
pub trait WorkRepository {
    fn list_work(&self, query: &WorkListQuery) -> RepoResult<Vec<WorkEntry>>;
    fn get_work(&self, id: WorkId) -> RepoResult<Option<WorkEntry>>;
    /// Inserts when `entry.id == 0`, otherwise updates; returns the id.
    fn save_work(&self, entry: &WorkEntry) -> RepoResult<WorkId>;
    fn delete_work(&self, id: WorkId) -> RepoResult<()>;
}

/// SQLite-backed work entry repository.
pub struct SqliteWorkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWorkRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn project_exists(&self, project_id: ProjectId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM project WHERE id = ?1);",
            [project_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl WorkRepository for SqliteWorkRepository<'_> {
    fn list_work(&self, query: &WorkListQuery) -> RepoResult<Vec<WorkEntry>> {
        let mut sql = format!("{WORK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(from) = query.from.as_ref() {
            sql.push_str(" AND w.work_date >= ?");
            bind_values.push(Value::Text(from.clone()));
        }
        if let Some(to) = query.to.as_ref() {
            // Timestamped legacy dates sort after the bare day, so compare the
            // day prefix for the upper bound.
            sql.push_str(" AND substr(w.work_date, 1, 10) <= ?");
            bind_values.push(Value::Text(to.clone()));
        }
        if let Some(project_id) = query.project_id {
            sql.push_str(" AND w.project_id = ?");
            bind_values.push(Value::Integer(project_id));
        }
        sql.push_str(" ORDER BY substr(w.work_date, 1, 10), w.id");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_work_row(row)?);
        }
        Ok(entries)
    }

    fn get_work(&self, id: WorkId) -> RepoResult<Option<WorkEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORK_SELECT_SQL} WHERE w.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_work_row(row)?));
        }
        Ok(None)
    }

    fn save_work(&self, entry: &WorkEntry) -> RepoResult<WorkId> {
        entry.validate()?;
        if !self.project_exists(entry.project_id)? {
            return Err(RepoError::not_found("project", entry.project_id));
        }

        if entry.id == 0 {
            self.conn.execute(
                "INSERT INTO work (project_id, work_date, hours, billable, description)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    entry.project_id,
                    entry.work_date.as_str(),
                    entry.hours,
                    bool_to_int(entry.billable),
                    entry.description.as_str(),
                ],
            )?;
            return Ok(self.conn.last_insert_rowid());
        }

        let changed = self.conn.execute(
            "UPDATE work
             SET
                project_id = ?1,
                work_date = ?2,
                hours = ?3,
                billable = ?4,
                description = ?5
             WHERE id = ?6;",
            params![
                entry.project_id,
                entry.work_date.as_str(),
                entry.hours,
                bool_to_int(entry.billable),
                entry.description.as_str(),
                entry.id,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("work", entry.id));
        }
        Ok(entry.id)
    }

    fn delete_work(&self, id: WorkId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM work WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("work", id));
        }
        Ok(())
    }
}

fn parse_work_row(row: &Row<'_>) -> RepoResult<WorkEntry> {
    let id: WorkId = row.get("id")?;
    let work_date = match row.get::<_, Value>("work_date")? {
        Value::Text(text) => truncate_work_date(text),
        Value::Null => String::new(),
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid work_date value {other:?} in work.work_date (id={id})"
            )));
        }
    };

    Ok(WorkEntry {
        id,
        project_id: row.get("project_id")?,
        work_date,
        hours: hours_from_value(id, row.get("hours")?),
        billable: billable_from_value(row.get("billable")?),
        description: row.get::<_, Option<String>>("description")?.unwrap_or_default(),
        project_name: row
            .get::<_, Option<String>>("project_name")?
            .unwrap_or_default(),
        client: row.get::<_, Option<String>>("client")?.unwrap_or_default(),
    })
}

/// Drops a trailing time component (`2025-01-01T12:00:00` -> `2025-01-01`).
fn truncate_work_date(mut value: String) -> String {
    if let Some((cut, _)) = value.char_indices().nth(WORK_DATE_LEN) {
        value.truncate(cut);
    }
    value
}

fn hours_from_value(id: WorkId, value: Value) -> f64 {
    match value {
        Value::Real(hours) => hours,
        Value::Integer(hours) => hours as f64,
        Value::Text(text) => text.trim().parse::<f64>().unwrap_or_else(|_| {
            warn!("event=work_read module=repo status=degraded id={id} reason=invalid_hours");
            0.0
        }),
        Value::Null | Value::Blob(_) => {
            warn!("event=work_read module=repo status=degraded id={id} reason=invalid_hours");
            0.0
        }
    }
}

fn billable_from_value(value: Value) -> bool {
    match value {
        Value::Integer(flag) => flag != 0,
        Value::Real(flag) => flag != 0.0,
        Value::Text(text) => matches!(text.trim(), "1" | "true" | "TRUE" | "on"),
        Value::Null | Value::Blob(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{billable_from_value, hours_from_value, truncate_work_date};
    use rusqlite::types::Value;

    #[test]
    fn truncate_work_date_drops_time_component() {
        assert_eq!(
            truncate_work_date("2025-01-01T12:00:00".to_string()),
            "2025-01-01"
        );
        assert_eq!(truncate_work_date("2025-01-01".to_string()), "2025-01-01");
        assert_eq!(truncate_work_date("bad".to_string()), "bad");
    }

    #[test]
    fn hours_coerce_text_and_fall_back_to_zero() {
        assert_eq!(hours_from_value(1, Value::Text(" 2.5 ".to_string())), 2.5);
        assert_eq!(hours_from_value(1, Value::Integer(3)), 3.0);
        assert_eq!(hours_from_value(1, Value::Text("lots".to_string())), 0.0);
        assert_eq!(hours_from_value(1, Value::Null), 0.0);
    }

    #[test]
    fn billable_accepts_legacy_text_flags() {
        assert!(billable_from_value(Value::Text("1".to_string())));
        assert!(billable_from_value(Value::Integer(1)));
        assert!(!billable_from_value(Value::Text("0".to_string())));
        assert!(!billable_from_value(Value::Null));
    }
}
