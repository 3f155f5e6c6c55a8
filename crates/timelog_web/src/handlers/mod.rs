//! Axum handlers, one module per page family.
//!
//! Handlers parse input, run service calls through `AppState::with_conn`
//! and hand the results to `pages`. Saves and deletes answer with
//! `303 See Other`.

pub(crate) mod calendar;
pub(crate) mod contacts;
pub(crate) mod projects;
pub(crate) mod reports;
pub(crate) mod work;

use crate::error::WebError;
use axum::response::Html;
use maud::Markup;

pub(crate) type PageResult = Result<Html<String>, WebError>;

pub(crate) fn render(markup: Markup) -> PageResult {
    Ok(Html(markup.into_string()))
}

/// Turns a missing record into a `404` naming what was looked up.
pub(crate) fn found<T>(record: Option<T>, what: &str, id: i64) -> Result<T, WebError> {
    record.ok_or_else(|| WebError::NotFound(format!("{what} {id} not found")))
}
