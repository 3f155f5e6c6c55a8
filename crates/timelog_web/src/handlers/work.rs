use super::{found, render, PageResult};
use crate::error::WebError;
use crate::forms::{parse_id, WorkForm};
use crate::{pages, today, AppState};
use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Form;
use timelog_core::{
    ProjectService, SqliteProjectRepository, SqliteWorkRepository, WorkEntry, WorkService,
};

pub(crate) async fn log(State(state): State<AppState>) -> PageResult {
    let since = state.config().log_since;
    let activity = state
        .with_conn(move |conn| {
            let service = WorkService::new(SqliteWorkRepository::try_new(conn)?);
            Ok(service.activity_log(since)?)
        })
        .await?;
    render(pages::log::log_page(&activity, since))
}

pub(crate) async fn show(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let id = parse_id(&id, "work entry")?;
    let entry = state
        .with_conn(move |conn| {
            let service = WorkService::new(SqliteWorkRepository::try_new(conn)?);
            found(service.get_work(id)?, "work entry", id)
        })
        .await?;
    render(pages::work::detail_page(&entry))
}

pub(crate) async fn edit(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let id = parse_id(&id, "work entry")?;
    let today = today();
    let (entry, projects) = state
        .with_conn(move |conn| {
            let entry = if id == 0 {
                WorkEntry::new_draft(today)
            } else {
                let service = WorkService::new(SqliteWorkRepository::try_new(conn)?);
                found(service.get_work(id)?, "work entry", id)?
            };
            let service = ProjectService::new(SqliteProjectRepository::try_new(conn)?);
            let mut projects = service.active_projects()?;
            // Keep an entry's own project selectable after it was deactivated.
            if entry.project_id != 0 && projects.iter().all(|p| p.id != entry.project_id) {
                if let Some(current) = service.get_project(entry.project_id)? {
                    projects.push(current);
                }
            }
            Ok((entry, projects))
        })
        .await?;
    render(pages::work::edit_page(&entry, &projects))
}

pub(crate) async fn save(
    State(state): State<AppState>,
    Form(form): Form<WorkForm>,
) -> Result<Redirect, WebError> {
    let entry = form.into_entry()?;
    let id = state
        .with_conn(move |conn| {
            let service = WorkService::new(SqliteWorkRepository::try_new(conn)?);
            Ok(service.save_work(&entry)?)
        })
        .await?;
    Ok(Redirect::to(&format!("/work_entry/{id}")))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    let id = parse_id(&id, "work entry")?;
    state
        .with_conn(move |conn| {
            let service = WorkService::new(SqliteWorkRepository::try_new(conn)?);
            Ok(service.delete_work(id)?)
        })
        .await?;
    Ok(Redirect::to("/log"))
}
