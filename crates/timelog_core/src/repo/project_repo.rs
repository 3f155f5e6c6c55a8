//! Project repository contract and SQLite implementation.
//!
//! # Invariants
//! - Lists are ordered by `client, name` (then `id` for ties).
//! - Deleting a project removes its work entries and contact links in the
//!   same transaction.

use super::{bool_to_int, ensure_connection_ready, RepoError, RepoResult};
use crate::model::project::{Project, ProjectCategory, ProjectId};
use log::warn;
use rusqlite::{params, Connection, Row};

pub(crate) const PROJECT_SELECT_SQL: &str = "SELECT
    p.id AS id,
    p.client AS client,
    p.name AS name,
    p.description AS description,
    p.category AS category,
    p.active AS active
FROM project p";

/// Repository interface for project CRUD operations.
pub trait ProjectRepository {
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Inserts when `project.id == 0`, otherwise updates; returns the id.
    fn save_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY p.client, p.name, p.id;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE p.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn save_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        if project.id == 0 {
            self.conn.execute(
                "INSERT INTO project (client, name, description, category, active)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    project.client.as_str(),
                    project.name.as_str(),
                    project.description.as_str(),
                    project.category.as_str(),
                    bool_to_int(project.active),
                ],
            )?;
            return Ok(self.conn.last_insert_rowid());
        }

        let changed = self.conn.execute(
            "UPDATE project
             SET
                client = ?1,
                name = ?2,
                description = ?3,
                category = ?4,
                active = ?5
             WHERE id = ?6;",
            params![
                project.client.as_str(),
                project.name.as_str(),
                project.description.as_str(),
                project.category.as_str(),
                bool_to_int(project.active),
                project.id,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("project", project.id));
        }
        Ok(project.id)
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM work WHERE project_id = ?1;", [id])?;
        tx.execute("DELETE FROM project_contact WHERE project_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM project WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("project", id));
        }
        tx.commit()?;
        Ok(())
    }
}

pub(crate) fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id: ProjectId = row.get("id")?;
    let category_text: String = row.get("category")?;
    // Adopted tables hold free-text categories; empty or unknown ones read as
    // `Other` so one odd row cannot hide the project list.
    let category = if category_text.trim().is_empty() {
        ProjectCategory::Other
    } else {
        ProjectCategory::parse(&category_text).unwrap_or_else(|_| {
            warn!(
                "event=project_category module=repo status=defaulted id={id} stored={category_text:?} used=Other"
            );
            ProjectCategory::Other
        })
    };

    Ok(Project {
        id,
        client: row.get("client")?,
        name: row.get("name")?,
        description: row.get("description")?,
        category,
        active: row.get::<_, i64>("active")? != 0,
    })
}
