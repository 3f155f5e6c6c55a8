use super::{render, PageResult};
use crate::forms::CalendarQuery;
use crate::{pages, today, AppState};
use axum::extract::{Query, State};
use chrono::Datelike;
use timelog_core::{SqliteWorkRepository, WorkService};

pub(crate) async fn month(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> PageResult {
    let today = today();
    let year = query
        .year
        .as_deref()
        .and_then(|value| value.trim().parse::<i32>().ok())
        .unwrap_or_else(|| today.year());
    // Unparseable months become 0, which the grid replaces with today's month.
    let month = match query.month.as_deref().map(str::trim) {
        None | Some("") => i64::from(today.month()),
        Some(value) => value.parse::<i64>().unwrap_or(0),
    };

    let grid = state
        .with_conn(move |conn| {
            let service = WorkService::new(SqliteWorkRepository::try_new(conn)?);
            Ok(service.month_calendar(year, month, today)?)
        })
        .await?;
    render(pages::calendar::month_page(&grid))
}
