//! Work entry use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for work entries.
//! - Build the activity log and month calendar projections from storage.
//!
//! # Invariants
//! - Projections are fed straight from `WorkRepository::list_work`, which
//!   already returns `(work_date, id)` order.

use crate::model::project::ProjectId;
use crate::model::work::{format_work_date, WorkEntry, WorkId};
use crate::repo::work_repo::{WorkListQuery, WorkRepository};
use crate::repo::{RepoError, RepoResult};
use crate::timeline::aggregate::{annotate_entries, ActivityLog};
use crate::timeline::calendar::{
    bucket_by_date, build_month_grid, resolve_month, CalendarError, MonthGrid,
};
use chrono::{Months, NaiveDate};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for projections that combine storage and date arithmetic.
#[derive(Debug)]
pub enum WorkServiceError {
    Repo(RepoError),
    Calendar(CalendarError),
}

impl Display for WorkServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Calendar(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Calendar(err) => Some(err),
        }
    }
}

impl From<RepoError> for WorkServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<CalendarError> for WorkServiceError {
    fn from(value: CalendarError) -> Self {
        Self::Calendar(value)
    }
}

/// Work booked against one project, with count and hour totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWork {
    pub entries: Vec<WorkEntry>,
    pub total_count: usize,
    pub total_hours: f64,
}

/// Use-case service wrapper for work entries.
pub struct WorkService<R: WorkRepository> {
    repo: R,
}

impl<R: WorkRepository> WorkService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_work(&self, id: WorkId) -> RepoResult<Option<WorkEntry>> {
        self.repo.get_work(id)
    }

    /// Creates (`id == 0`) or updates a work entry and returns its id.
    pub fn save_work(&self, entry: &WorkEntry) -> RepoResult<WorkId> {
        let id = self.repo.save_work(entry)?;
        info!(
            "event=work_save module=service status=ok id={id} project_id={} created={}",
            entry.project_id,
            entry.id == 0
        );
        Ok(id)
    }

    pub fn delete_work(&self, id: WorkId) -> RepoResult<()> {
        self.repo.delete_work(id)?;
        info!("event=work_delete module=service status=ok id={id}");
        Ok(())
    }

    /// All entries for a project in date order, with totals.
    pub fn project_work(&self, project_id: ProjectId) -> RepoResult<ProjectWork> {
        let entries = self.repo.list_work(&WorkListQuery::for_project(project_id))?;
        let total_hours = entries.iter().map(|entry| entry.hours).sum();
        Ok(ProjectWork {
            total_count: entries.len(),
            total_hours,
            entries,
        })
    }

    /// Running log of entries dated on or after `since`, with subtotals.
    pub fn activity_log(&self, since: NaiveDate) -> RepoResult<ActivityLog> {
        let entries = self
            .repo
            .list_work(&WorkListQuery::since(format_work_date(since)))?;
        let total = entries.len();
        let log = annotate_entries(entries);
        info!(
            "event=activity_log module=service status=ok rows={total} skipped={}",
            log.skipped.len()
        );
        Ok(log)
    }

    /// Calendar grid for `year`/`month`; invalid months fall back to `today`'s.
    pub fn month_calendar(
        &self,
        year: i32,
        month: i64,
        today: NaiveDate,
    ) -> Result<MonthGrid, WorkServiceError> {
        let resolved = resolve_month(month, today);
        let first = NaiveDate::from_ymd_opt(year, resolved, 1)
            .ok_or(CalendarError::YearOutOfRange(year))?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or(CalendarError::YearOutOfRange(year))?;

        let entries = self.repo.list_work(&WorkListQuery::between(
            format_work_date(first),
            format_work_date(last),
        ))?;
        let buckets = bucket_by_date(entries);
        Ok(build_month_grid(
            year,
            i64::from(resolved),
            &buckets,
            today,
        )?)
    }
}
