//! Domain model for projects, work entries and contacts.
//!
//! # Responsibility
//! - Define canonical records shared by repositories, services and views.
//! - Keep write-side validation next to the records it guards.
//!
//! # Invariants
//! - Integer ids are assigned by storage; `0` marks a record not yet saved.
//! - Work dates are kept as `YYYY-MM-DD` text so legacy rows with malformed
//!   dates can still be listed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact;
pub mod project;
pub mod work;

/// Write-side validation failure for domain records.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Project name is empty after trimming.
    EmptyProjectName,
    /// Work date is not a `YYYY-MM-DD` calendar date.
    InvalidWorkDate(String),
    /// Work hours are negative, NaN or infinite.
    InvalidHours(f64),
    /// Category text does not name a known project category.
    UnknownCategory(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProjectName => write!(f, "project name cannot be empty"),
            Self::InvalidWorkDate(value) => {
                write!(f, "work date `{value}` is not a YYYY-MM-DD date")
            }
            Self::InvalidHours(value) => {
                write!(f, "hours must be a non-negative number, got {value}")
            }
            Self::UnknownCategory(value) => write!(f, "unknown project category `{value}`"),
        }
    }
}

impl Error for ValidationError {}
