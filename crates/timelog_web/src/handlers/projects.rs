use super::{found, render, PageResult};
use crate::error::WebError;
use crate::forms::{parse_id, ProjectForm, ProjectListQuery};
use crate::pages;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::Form;
use timelog_core::{
    ContactService, Project, ProjectFilter, ProjectService, SqliteContactRepository,
    SqliteProjectRepository, SqliteWorkRepository, WorkService,
};

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> PageResult {
    let filter = ProjectFilter::from_query(query.filter.as_deref());
    let projects = state
        .with_conn(move |conn| {
            let service = ProjectService::new(SqliteProjectRepository::try_new(conn)?);
            Ok(service.list_projects(filter)?)
        })
        .await?;
    render(pages::projects::list_page(&projects, filter))
}

pub(crate) async fn show(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let id = parse_id(&id, "project")?;
    let (project, work, contacts) = state
        .with_conn(move |conn| {
            let projects = ProjectService::new(SqliteProjectRepository::try_new(conn)?);
            let project = found(projects.get_project(id)?, "project", id)?;
            let work = WorkService::new(SqliteWorkRepository::try_new(conn)?).project_work(id)?;
            let contacts =
                ContactService::new(SqliteContactRepository::try_new(conn)?).contacts_for_project(id)?;
            Ok((project, work, contacts))
        })
        .await?;
    render(pages::projects::detail_page(&project, &work, &contacts))
}

pub(crate) async fn edit(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let id = parse_id(&id, "project")?;
    let project = if id == 0 {
        Project::new_draft()
    } else {
        state
            .with_conn(move |conn| {
                let service = ProjectService::new(SqliteProjectRepository::try_new(conn)?);
                found(service.get_project(id)?, "project", id)
            })
            .await?
    };
    render(pages::projects::edit_page(&project))
}

pub(crate) async fn save(
    State(state): State<AppState>,
    Form(form): Form<ProjectForm>,
) -> Result<Redirect, WebError> {
    let project = form.into_project()?;
    let id = state
        .with_conn(move |conn| {
            let service = ProjectService::new(SqliteProjectRepository::try_new(conn)?);
            Ok(service.save_project(&project)?)
        })
        .await?;
    Ok(Redirect::to(&format!("/project/{id}")))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    let id = parse_id(&id, "project")?;
    state
        .with_conn(move |conn| {
            let service = ProjectService::new(SqliteProjectRepository::try_new(conn)?);
            Ok(service.delete_project(id)?)
        })
        .await?;
    Ok(Redirect::to("/projects"))
}
