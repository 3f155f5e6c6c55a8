//! Work entry domain model.
//!
//! # Invariants
//! - `work_date` is `YYYY-MM-DD` for every entry written through validation;
//!   rows read back from legacy data may still hold malformed text.
//! - `hours` is finite and non-negative on write.

use super::project::ProjectId;
use super::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage-assigned work entry identifier.
pub type WorkId = i64;

/// Date format used for storage, labels and date-keyed buckets.
pub const WORK_DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded block of time against a project on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub id: WorkId,
    pub project_id: ProjectId,
    pub work_date: String,
    pub hours: f64,
    pub billable: bool,
    pub description: String,
    /// Joined from `project.name`; empty when the project row is gone.
    pub project_name: String,
    /// Joined from `project.client`; empty when the project row is gone.
    pub client: String,
}

impl WorkEntry {
    /// Defaults for the "new work entry" form: today, one billable hour.
    pub fn new_draft(today: NaiveDate) -> Self {
        Self {
            id: 0,
            project_id: 0,
            work_date: format_work_date(today),
            hours: 1.0,
            billable: true,
            description: String::new(),
            project_name: String::new(),
            client: String::new(),
        }
    }

    /// Parses `work_date`, returning `None` for malformed values.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_work_date(&self.work_date)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.date().is_none() {
            return Err(ValidationError::InvalidWorkDate(self.work_date.clone()));
        }
        if !self.hours.is_finite() || self.hours < 0.0 {
            return Err(ValidationError::InvalidHours(self.hours));
        }
        Ok(())
    }
}

/// Parses a canonical `YYYY-MM-DD` date. Stored dates are compared as text,
/// so anything that would not round-trip through `format_work_date` (short
/// month or day, sign, padding) is rejected.
pub fn parse_work_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, WORK_DATE_FORMAT).ok()?;
    (format_work_date(date) == value).then_some(date)
}

pub fn format_work_date(date: NaiveDate) -> String {
    date.format(WORK_DATE_FORMAT).to_string()
}
