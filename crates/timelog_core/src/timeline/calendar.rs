//! Month grid layout for the calendar page.
//!
//! # Invariants
//! - Every week row has exactly 7 cells, Sunday first.
//! - Exactly `days_in_month` cells are filled; blanks only pad the first and
//!   last rows.
//! - Project colours come from `PALETTE` by identifier and are stable across
//!   requests, but two projects may share a colour.

use crate::model::project::ProjectId;
use crate::model::work::{format_work_date, WorkEntry};
use chrono::{Datelike, Months, NaiveDate, Weekday};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Columns per grid row.
pub const DAYS_PER_WEEK: usize = 7;

/// Bulma colour modifiers handed out to projects by id.
pub const PALETTE: [&str; 14] = [
    "is-primary",
    "is-link",
    "is-info",
    "is-success",
    "is-warning",
    "is-danger",
    "is-dark",
    "is-black",
    "is-primary is-light",
    "is-link is-light",
    "is-info is-light",
    "is-success is-light",
    "is-warning is-light",
    "is-danger is-light",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// The month (or a neighbour used for navigation) is outside the range
    /// the date library can represent.
    YearOutOfRange(i32),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearOutOfRange(year) => write!(f, "year {year} is out of range"),
        }
    }
}

impl Error for CalendarError {}

/// Year/month pair used for previous/next navigation links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl MonthRef {
    fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// One non-blank day in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub day: u32,
    pub entries: Vec<WorkEntry>,
}

/// Seven cells, `None` for blank filler outside the month.
pub type CalendarWeek = [Option<CalendarCell>; DAYS_PER_WEEK];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub first_day: NaiveDate,
    pub days_in_month: u32,
    pub start_weekday: Weekday,
    pub weeks: Vec<CalendarWeek>,
    pub colors: BTreeMap<ProjectId, &'static str>,
    pub prev: MonthRef,
    pub next: MonthRef,
}

impl MonthGrid {
    /// Heading text such as `January 2025`.
    pub fn title(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    pub fn color_for(&self, project_id: ProjectId) -> &'static str {
        self.colors
            .get(&project_id)
            .copied()
            .unwrap_or_else(|| palette_color(project_id))
    }
}

/// Grid column (0 = Sunday .. 6 = Saturday) for a weekday.
pub fn column_of(weekday: Weekday) -> usize {
    weekday.num_days_from_sunday() as usize
}

/// Palette entry for a project id; the modulo sign is normalised so any
/// integer maps to a valid slot.
pub fn palette_color(project_id: ProjectId) -> &'static str {
    let slot = (project_id % PALETTE.len() as i64).unsigned_abs() as usize;
    PALETTE[slot]
}

/// Month to display: `month` when it is 1–12, otherwise the month of `today`.
pub fn resolve_month(month: i64, today: NaiveDate) -> u32 {
    match u32::try_from(month) {
        Ok(value @ 1..=12) => value,
        _ => {
            debug!(
                "event=calendar_month module=timeline status=defaulted requested={month} used={}",
                today.month()
            );
            today.month()
        }
    }
}

/// Groups entries by their exact `work_date` text.
pub fn bucket_by_date(entries: Vec<WorkEntry>) -> BTreeMap<String, Vec<WorkEntry>> {
    let mut buckets: BTreeMap<String, Vec<WorkEntry>> = BTreeMap::new();
    for entry in entries {
        buckets.entry(entry.work_date.clone()).or_default().push(entry);
    }
    buckets
}

/// Builds the Sunday-first grid for `year`/`month`.
///
/// An out-of-range `month` falls back to the month of `today`; the year is
/// taken as given.
pub fn build_month_grid(
    year: i32,
    month: i64,
    entries_by_date: &BTreeMap<String, Vec<WorkEntry>>,
    today: NaiveDate,
) -> Result<MonthGrid, CalendarError> {
    let month = resolve_month(month, today);
    let out_of_range = || CalendarError::YearOutOfRange(year);

    let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
    let first_of_next = first_day
        .checked_add_months(Months::new(1))
        .ok_or_else(out_of_range)?;
    let first_of_prev = first_day
        .checked_sub_months(Months::new(1))
        .ok_or_else(out_of_range)?;
    let last_day = first_of_next.pred_opt().ok_or_else(out_of_range)?;
    let days_in_month = last_day.day();
    let start_weekday = first_day.weekday();

    let mut weeks: Vec<CalendarWeek> = Vec::with_capacity(6);
    let mut current: CalendarWeek = std::array::from_fn(|_| None);
    let mut column = column_of(start_weekday);
    let mut colors = BTreeMap::new();

    for date in first_day.iter_days().take(days_in_month as usize) {
        let entries = entries_by_date
            .get(&format_work_date(date))
            .cloned()
            .unwrap_or_default();
        for entry in &entries {
            colors
                .entry(entry.project_id)
                .or_insert_with(|| palette_color(entry.project_id));
        }

        current[column] = Some(CalendarCell {
            date,
            day: date.day(),
            entries,
        });
        column += 1;
        if column == DAYS_PER_WEEK {
            weeks.push(std::mem::replace(
                &mut current,
                std::array::from_fn(|_| None),
            ));
            column = 0;
        }
    }
    if column != 0 {
        weeks.push(current);
    }

    Ok(MonthGrid {
        year,
        month,
        first_day,
        days_in_month,
        start_weekday,
        weeks,
        colors,
        prev: MonthRef::of(first_of_prev),
        next: MonthRef::of(first_of_next),
    })
}
