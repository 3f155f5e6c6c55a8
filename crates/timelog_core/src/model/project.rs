//! Project domain model.

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Storage-assigned project identifier.
pub type ProjectId = i64;

/// Accounting bucket a project's hours are reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectCategory {
    Billable,
    #[serde(rename = "CD")]
    Cd,
    #[serde(rename = "IP")]
    Ip,
    Training,
    Absent,
    #[default]
    Other,
}

impl ProjectCategory {
    /// All categories in the order shown by edit forms.
    pub const ALL: [ProjectCategory; 6] = [
        Self::Billable,
        Self::Cd,
        Self::Ip,
        Self::Training,
        Self::Absent,
        Self::Other,
    ];

    /// Stored/display text for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Billable => "Billable",
            Self::Cd => "CD",
            Self::Ip => "IP",
            Self::Training => "Training",
            Self::Absent => "Absent",
            Self::Other => "Other",
        }
    }

    /// Parses stored/form text, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownCategory(trimmed.to_string()))
    }
}

/// One client engagement that work is booked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub client: String,
    pub name: String,
    pub description: String,
    pub category: ProjectCategory,
    pub active: bool,
}

impl Project {
    /// Blank, active project used by the "new project" form.
    pub fn new_draft() -> Self {
        Self {
            id: 0,
            client: String::new(),
            name: String::new(),
            description: String::new(),
            category: ProjectCategory::default(),
            active: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        Ok(())
    }
}

/// Which projects the list page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    Active,
    Inactive,
    All,
}

impl ProjectFilter {
    /// Parses the `filter` query value; empty means `Active`, unknown means `All`.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("active") => Self::Active,
            Some("inactive") => Self::Inactive,
            Some(_) => Self::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::All => "all",
        }
    }

    pub fn matches(self, project: &Project) -> bool {
        match self {
            Self::Active => project.active,
            Self::Inactive => !project.active,
            Self::All => true,
        }
    }
}
