//! Contact domain model.

use serde::{Deserialize, Serialize};

/// Storage-assigned contact identifier.
pub type ContactId = i64;

/// A person associated with zero or more projects.
///
/// Multi-valued fields (`phones`, `emails`) are free text, one value per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub title: String,
    pub source: String,
    pub phones: String,
    pub emails: String,
    pub address: String,
    pub comments: String,
    pub active: bool,
}

impl Contact {
    /// `"First Last"`, falling back to the company for nameless contacts.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.company.trim().to_string()
        } else {
            name.to_string()
        }
    }
}
