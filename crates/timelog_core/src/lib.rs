//! Core domain logic for the timelog application.
//! This crate owns storage, business rules and the derived log/calendar views.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod timeline;

pub use logging::{
    default_log_level, init_logging, logging_status, LogTarget, LoggingError,
};
pub use model::contact::{Contact, ContactId};
pub use model::project::{Project, ProjectCategory, ProjectFilter, ProjectId};
pub use model::work::{format_work_date, parse_work_date, WorkEntry, WorkId};
pub use model::ValidationError;
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::work_repo::{SqliteWorkRepository, WorkListQuery, WorkRepository};
pub use repo::{RepoError, RepoResult};
pub use service::contact_service::ContactService;
pub use service::project_service::ProjectService;
pub use service::work_service::{ProjectWork, WorkService, WorkServiceError};
pub use timeline::aggregate::{
    annotate_entries, ActivityLog, AnnotatedEntry, Period, PeriodTotal, SkippedEntry,
};
pub use timeline::calendar::{
    bucket_by_date, build_month_grid, CalendarCell, CalendarError, MonthGrid, MonthRef,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
