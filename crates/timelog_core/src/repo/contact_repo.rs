//! Contact repository contract and SQLite implementation, including the
//! contact/project link table.
//!
//! # Invariants
//! - Lists are ordered by `last_name, first_name` (then `id`).
//! - Deleting a contact removes its project links in the same transaction.
//! - Linking is idempotent; linking to a missing contact or project fails
//!   with `NotFound`.

use super::project_repo::{parse_project_row, PROJECT_SELECT_SQL};
use super::{bool_to_int, ensure_connection_ready, RepoError, RepoResult};
use crate::model::contact::{Contact, ContactId};
use crate::model::project::{Project, ProjectId};
use rusqlite::{params, Connection, Row};

const CONTACT_SELECT_SQL: &str = "SELECT
    c.id AS id,
    c.first_name AS first_name,
    c.last_name AS last_name,
    c.company AS company,
    c.title AS title,
    c.source AS source,
    c.phones AS phones,
    c.emails AS emails,
    c.address AS address,
    c.comments AS comments,
    c.active AS active
FROM contact c";

/// Repository interface for contacts and their project links.
pub trait ContactRepository {
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Inserts when `contact.id == 0`, otherwise updates; returns the id.
    fn save_contact(&self, contact: &Contact) -> RepoResult<ContactId>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    fn link_project(&self, contact_id: ContactId, project_id: ProjectId) -> RepoResult<()>;
    fn unlink_project(&self, contact_id: ContactId, project_id: ProjectId) -> RepoResult<()>;
    fn list_projects_for_contact(&self, contact_id: ContactId) -> RepoResult<Vec<Project>>;
    fn list_contacts_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Contact>>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn row_exists(&self, table: &'static str, id: i64) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL} ORDER BY c.last_name, c.first_name, c.id;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE c.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }
        Ok(None)
    }

    fn save_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        if contact.id == 0 {
            self.conn.execute(
                "INSERT INTO contact (
                    first_name,
                    last_name,
                    company,
                    title,
                    source,
                    phones,
                    emails,
                    address,
                    comments,
                    active
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
                params![
                    contact.first_name.as_str(),
                    contact.last_name.as_str(),
                    contact.company.as_str(),
                    contact.title.as_str(),
                    contact.source.as_str(),
                    contact.phones.as_str(),
                    contact.emails.as_str(),
                    contact.address.as_str(),
                    contact.comments.as_str(),
                    bool_to_int(contact.active),
                ],
            )?;
            return Ok(self.conn.last_insert_rowid());
        }

        let changed = self.conn.execute(
            "UPDATE contact
             SET
                first_name = ?1,
                last_name = ?2,
                company = ?3,
                title = ?4,
                source = ?5,
                phones = ?6,
                emails = ?7,
                address = ?8,
                comments = ?9,
                active = ?10
             WHERE id = ?11;",
            params![
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.company.as_str(),
                contact.title.as_str(),
                contact.source.as_str(),
                contact.phones.as_str(),
                contact.emails.as_str(),
                contact.address.as_str(),
                contact.comments.as_str(),
                bool_to_int(contact.active),
                contact.id,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("contact", contact.id));
        }
        Ok(contact.id)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM project_contact WHERE contact_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM contact WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("contact", id));
        }
        tx.commit()?;
        Ok(())
    }

    fn link_project(&self, contact_id: ContactId, project_id: ProjectId) -> RepoResult<()> {
        if !self.row_exists("contact", contact_id)? {
            return Err(RepoError::not_found("contact", contact_id));
        }
        if !self.row_exists("project", project_id)? {
            return Err(RepoError::not_found("project", project_id));
        }
        self.conn.execute(
            "INSERT OR IGNORE INTO project_contact (project_id, contact_id) VALUES (?1, ?2);",
            params![project_id, contact_id],
        )?;
        Ok(())
    }

    fn unlink_project(&self, contact_id: ContactId, project_id: ProjectId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM project_contact WHERE project_id = ?1 AND contact_id = ?2;",
            params![project_id, contact_id],
        )?;
        Ok(())
    }

    fn list_projects_for_contact(&self, contact_id: ContactId) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             INNER JOIN project_contact pc ON pc.project_id = p.id
             WHERE pc.contact_id = ?1
             ORDER BY p.client, p.name, p.id;"
        ))?;
        let mut rows = stmt.query([contact_id])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn list_contacts_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL}
             INNER JOIN project_contact pc ON pc.contact_id = c.id
             WHERE pc.project_id = ?1
             ORDER BY c.last_name, c.first_name, c.id;"
        ))?;
        let mut rows = stmt.query([project_id])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        company: row.get("company")?,
        title: row.get("title")?,
        source: row.get("source")?,
        phones: row.get("phones")?,
        emails: row.get("emails")?,
        address: row.get("address")?,
        comments: row.get("comments")?,
        active: row.get::<_, i64>("active")? != 0,
    })
}
