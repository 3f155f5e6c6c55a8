//! Typed parsing of path segments, query strings and posted forms.
//!
//! Browsers submit every field as text; this module turns that text into core
//! records and reports anything unparseable as a `400`.

use crate::error::WebError;
use serde::Deserialize;
use timelog_core::{
    parse_work_date, Contact, ContactId, Project, ProjectCategory, ProjectId, WorkEntry, WorkId,
};

/// Parses a record id; blank form ids mean "new record" (`0`).
pub(crate) fn parse_id(value: &str, what: &str) -> Result<i64, WebError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| WebError::bad_request(format!("Invalid {what} ID")))
}

/// Like `parse_id`, but a blank value is also an error.
pub(crate) fn require_id(value: &str, what: &str) -> Result<i64, WebError> {
    if value.trim().is_empty() {
        return Err(WebError::bad_request(format!("Invalid {what} ID")));
    }
    parse_id(value, what)
}

/// HTML checkboxes post `on` when ticked and nothing otherwise.
fn checkbox(value: Option<&str>) -> bool {
    matches!(
        value.map(str::trim),
        Some(v) if v.eq_ignore_ascii_case("on") || v == "1" || v.eq_ignore_ascii_case("true")
    )
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub active: Option<String>,
}

impl ProjectForm {
    pub(crate) fn into_project(self) -> Result<Project, WebError> {
        let category = if self.category.trim().is_empty() {
            ProjectCategory::default()
        } else {
            ProjectCategory::parse(&self.category).map_err(|err| WebError::bad_request(err.to_string()))?
        };
        Ok(Project {
            id: parse_id(&self.id, "project")?,
            client: self.client.trim().to_string(),
            name: self.name.trim().to_string(),
            description: self.description,
            category,
            active: checkbox(self.active.as_deref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WorkForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub work_date: String,
    #[serde(default)]
    pub hours: String,
    pub billable: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl WorkForm {
    pub(crate) fn into_entry(self) -> Result<WorkEntry, WebError> {
        let id: WorkId = parse_id(&self.id, "work entry")?;
        let project_id: ProjectId = require_id(&self.project_id, "project")?;
        let work_date = self.work_date.trim().to_string();
        if parse_work_date(&work_date).is_none() {
            return Err(WebError::bad_request("Invalid work date"));
        }
        let hours: f64 = self
            .hours
            .trim()
            .parse()
            .map_err(|_| WebError::bad_request("Invalid hours"))?;

        Ok(WorkEntry {
            id,
            project_id,
            work_date,
            hours,
            billable: checkbox(self.billable.as_deref()),
            description: self.description,
            project_name: String::new(),
            client: String::new(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContactForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub phones: String,
    #[serde(default)]
    pub emails: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub comments: String,
    pub active: Option<String>,
}

impl ContactForm {
    pub(crate) fn into_contact(self) -> Result<Contact, WebError> {
        let id: ContactId = parse_id(&self.id, "contact")?;
        Ok(Contact {
            id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            company: self.company.trim().to_string(),
            title: self.title.trim().to_string(),
            source: self.source.trim().to_string(),
            phones: self.phones,
            emails: self.emails,
            address: self.address,
            comments: self.comments,
            active: checkbox(self.active.as_deref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LinkForm {
    #[serde(default)]
    pub project_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UnlinkQuery {
    #[serde(default)]
    pub contact_id: String,
    #[serde(default)]
    pub project_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectListQuery {
    pub filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CalendarQuery {
    pub year: Option<String>,
    pub month: Option<String>,
}
