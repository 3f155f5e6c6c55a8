use super::{found, render, PageResult};
use crate::error::WebError;
use crate::forms::{parse_id, require_id, ContactForm, LinkForm, UnlinkQuery};
use crate::pages;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::Form;
use timelog_core::{
    Contact, ContactService, ProjectService, SqliteContactRepository, SqliteProjectRepository,
};

pub(crate) async fn list(State(state): State<AppState>) -> PageResult {
    let contacts = state
        .with_conn(|conn| {
            let service = ContactService::new(SqliteContactRepository::try_new(conn)?);
            Ok(service.list_contacts()?)
        })
        .await?;
    render(pages::contacts::list_page(&contacts))
}

pub(crate) async fn show(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let id = parse_id(&id, "contact")?;
    let (contact, linked, available) = state
        .with_conn(move |conn| {
            let contacts = ContactService::new(SqliteContactRepository::try_new(conn)?);
            let contact = found(contacts.get_contact(id)?, "contact", id)?;
            let linked = contacts.projects_for_contact(id)?;
            let available = ProjectService::new(SqliteProjectRepository::try_new(conn)?)
                .active_projects()?
                .into_iter()
                .filter(|project| linked.iter().all(|l| l.id != project.id))
                .collect::<Vec<_>>();
            Ok((contact, linked, available))
        })
        .await?;
    render(pages::contacts::detail_page(&contact, &linked, &available))
}

pub(crate) async fn edit(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let id = parse_id(&id, "contact")?;
    let contact = if id == 0 {
        Contact {
            active: true,
            ..Contact::default()
        }
    } else {
        state
            .with_conn(move |conn| {
                let service = ContactService::new(SqliteContactRepository::try_new(conn)?);
                found(service.get_contact(id)?, "contact", id)
            })
            .await?
    };
    render(pages::contacts::edit_page(&contact))
}

pub(crate) async fn save(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Redirect, WebError> {
    let contact = form.into_contact()?;
    let id = state
        .with_conn(move |conn| {
            let service = ContactService::new(SqliteContactRepository::try_new(conn)?);
            Ok(service.save_contact(&contact)?)
        })
        .await?;
    Ok(Redirect::to(&format!("/contact/{id}")))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    let id = parse_id(&id, "contact")?;
    state
        .with_conn(move |conn| {
            let service = ContactService::new(SqliteContactRepository::try_new(conn)?);
            Ok(service.delete_contact(id)?)
        })
        .await?;
    Ok(Redirect::to("/contacts"))
}

pub(crate) async fn add_project_link(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
    Form(form): Form<LinkForm>,
) -> Result<Redirect, WebError> {
    let contact_id = require_id(&contact_id, "contact")?;
    let project_id = require_id(&form.project_id, "project")?;
    state
        .with_conn(move |conn| {
            let service = ContactService::new(SqliteContactRepository::try_new(conn)?);
            Ok(service.link_project(contact_id, project_id)?)
        })
        .await?;
    Ok(Redirect::to(&format!("/contact/{contact_id}")))
}

pub(crate) async fn delete_project_link(
    State(state): State<AppState>,
    Query(query): Query<UnlinkQuery>,
) -> Result<Redirect, WebError> {
    let contact_id = require_id(&query.contact_id, "contact")?;
    let project_id = require_id(&query.project_id, "project")?;
    state
        .with_conn(move |conn| {
            let service = ContactService::new(SqliteContactRepository::try_new(conn)?);
            Ok(service.unlink_project(contact_id, project_id)?)
        })
        .await?;
    Ok(Redirect::to(&format!("/contact/{contact_id}")))
}
