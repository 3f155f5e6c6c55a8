//! Date-based projections over work entries.
//!
//! # Responsibility
//! - `aggregate`: annotate a sorted entry list with day/week/month closings
//!   for the running activity log.
//! - `calendar`: lay one month of entries out as a Sunday-first week grid.
//!
//! # Invariants
//! - Both projections are pure: no I/O, no shared state, one call per request.

pub mod aggregate;
pub mod calendar;
