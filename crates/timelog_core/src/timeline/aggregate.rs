//! Running day/week/month subtotals for the activity log.
//!
//! # Invariants
//! - Input must be sorted by `(work_date, id)` ascending; period boundaries
//!   are detected by label changes between neighbours, never by sorting.
//! - Each period's closing sits on exactly one entry: the last one of that
//!   period in input order.
//! - The last emitted entry always closes all three periods.
//! - Entries with malformed dates are dropped and reported, never fatal.

use crate::model::work::{format_work_date, WorkEntry, WorkId};
use chrono::{Datelike, NaiveDate};
use log::warn;
use serde::Serialize;

/// Calendar granularity a subtotal is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// `YYYY-MM-DD`.
    Day,
    /// ISO-8601 week, `YYYY-Www` with the week-numbering year.
    Week,
    /// `YYYY-MM`.
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Self::Day, Self::Week, Self::Month];

    /// Label of the period of this granularity that contains `date`.
    pub fn label(self, date: NaiveDate) -> String {
        match self {
            Self::Day => format_work_date(date),
            Self::Week => {
                let week = date.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Self::Month => date.format("%Y-%m").to_string(),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Day => 0,
            Self::Week => 1,
            Self::Month => 2,
        }
    }
}

/// Total attached to the entry that closes a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub label: String,
    pub hours: f64,
}

/// One work entry plus the period closings that fall on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedEntry {
    pub entry: WorkEntry,
    pub day_total: Option<PeriodTotal>,
    pub week_total: Option<PeriodTotal>,
    pub month_total: Option<PeriodTotal>,
}

impl AnnotatedEntry {
    fn new(entry: WorkEntry) -> Self {
        Self {
            entry,
            day_total: None,
            week_total: None,
            month_total: None,
        }
    }

    pub fn total(&self, period: Period) -> Option<&PeriodTotal> {
        match period {
            Period::Day => self.day_total.as_ref(),
            Period::Week => self.week_total.as_ref(),
            Period::Month => self.month_total.as_ref(),
        }
    }

    /// Whether this entry is the last one of its `period`.
    pub fn closes(&self, period: Period) -> bool {
        self.total(period).is_some()
    }

    fn set_total(&mut self, period: Period, total: PeriodTotal) {
        let slot = match period {
            Period::Day => &mut self.day_total,
            Period::Week => &mut self.week_total,
            Period::Month => &mut self.month_total,
        };
        *slot = Some(total);
    }
}

/// Entry left out of the log because its date could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub id: WorkId,
    pub work_date: String,
}

/// Annotated entries in input order plus the entries that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityLog {
    pub entries: Vec<AnnotatedEntry>,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Default)]
struct Accumulator {
    label: Option<String>,
    hours: f64,
}

impl Accumulator {
    /// Closes the running period when `label` starts a new one.
    fn roll_over(&mut self, label: &str) -> Option<PeriodTotal> {
        let previous = self.label.as_deref()?;
        if previous == label {
            return None;
        }
        let closed = PeriodTotal {
            label: previous.to_string(),
            hours: self.hours,
        };
        self.hours = 0.0;
        Some(closed)
    }

    fn add(&mut self, label: String, hours: f64) {
        self.hours += hours;
        self.label = Some(label);
    }

    fn current(&self) -> Option<PeriodTotal> {
        self.label.as_ref().map(|label| PeriodTotal {
            label: label.clone(),
            hours: self.hours,
        })
    }
}

/// Annotates `entries` (sorted by date, then id) with period closings.
pub fn annotate_entries(entries: Vec<WorkEntry>) -> ActivityLog {
    let mut log = ActivityLog {
        entries: Vec::with_capacity(entries.len()),
        skipped: Vec::new(),
    };
    let mut accumulators: [Accumulator; 3] = Default::default();

    for entry in entries {
        let Some(date) = entry.date() else {
            warn!(
                "event=log_aggregate module=timeline status=skipped id={} work_date={:?}",
                entry.id, entry.work_date
            );
            log.skipped.push(SkippedEntry {
                id: entry.id,
                work_date: entry.work_date,
            });
            continue;
        };

        let hours = entry.hours;
        for period in Period::ALL {
            let label = period.label(date);
            let accumulator = &mut accumulators[period.index()];
            if let Some(closed) = accumulator.roll_over(&label) {
                if let Some(last) = log.entries.last_mut() {
                    last.set_total(period, closed);
                }
            }
            accumulator.add(label, hours);
        }
        log.entries.push(AnnotatedEntry::new(entry));
    }

    if let Some(last) = log.entries.last_mut() {
        for period in Period::ALL {
            if let Some(total) = accumulators[period.index()].current() {
                last.set_total(period, total);
            }
        }
    }

    log
}

#[cfg(test)]
mod tests {
    use super::{annotate_entries, Period};
    use crate::model::work::WorkEntry;
    use chrono::NaiveDate;

    fn entry(id: i64, date: &str, hours: f64) -> WorkEntry {
        WorkEntry {
            id,
            project_id: 1,
            work_date: date.to_string(),
            hours,
            billable: true,
            description: String::new(),
            project_name: "Site".to_string(),
            client: "Acme".to_string(),
        }
    }

    #[test]
    fn week_label_uses_iso_week_year() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(Period::Week.label(date), "2020-W53");
        let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(Period::Week.label(date), "2025-W01");
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(Period::Week.label(date), "2025-W10");
        assert_eq!(Period::Month.label(date), "2025-03");
        assert_eq!(Period::Day.label(date), "2025-03-05");
    }

    #[test]
    fn empty_input_yields_empty_log() {
        let log = annotate_entries(Vec::new());
        assert!(log.entries.is_empty());
        assert!(log.skipped.is_empty());
    }

    #[test]
    fn single_entry_closes_every_period() {
        let log = annotate_entries(vec![entry(1, "2025-06-10", 2.5)]);
        let only = &log.entries[0];
        for period in Period::ALL {
            assert_eq!(only.total(period).unwrap().hours, 2.5);
        }
        assert_eq!(only.week_total.as_ref().unwrap().label, "2025-W24");
    }

    #[test]
    fn trailing_malformed_entry_does_not_hide_final_totals() {
        let log = annotate_entries(vec![entry(1, "2025-06-10", 1.0), entry(2, "junk", 4.0)]);
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.skipped.len(), 1);
        assert!(Period::ALL.iter().all(|p| log.entries[0].closes(*p)));
        assert_eq!(log.entries[0].day_total.as_ref().unwrap().hours, 1.0);
    }
}
