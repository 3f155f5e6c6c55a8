//! HTTP surface for the timelog application.
//!
//! # Responsibility
//! - Route page requests to core services and render server-side HTML.
//! - Parse path/query/form input into typed core records.
//! - Serve static assets (Bulma, favicon, robots.txt).
//!
//! # Invariants
//! - SQLite work never runs on the async executor; every request opens its
//!   own connection inside `spawn_blocking`.
//! - Handlers never panic on user input; bad input maps to `400`.

pub mod config;
pub mod error;
mod forms;
mod handlers;
mod pages;

pub use config::{ConfigError, ServerConfig};
pub use error::WebError;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use chrono::{Local, NaiveDate};
use log::info;
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Instant;
use timelog_core::db::open_db;
use tower_http::services::{ServeDir, ServeFile};

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Runs `op` against a fresh connection on the blocking thread pool.
    pub(crate) async fn with_conn<T, F>(&self, op: F) -> Result<T, WebError>
    where
        F: FnOnce(&Connection) -> Result<T, WebError> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.config.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = open_db(&db_path)?;
            op(&conn)
        })
        .await?
    }
}

/// Today's date in the server's local time zone.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Builds the application router with all page and static routes.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(handlers::projects::list))
        .route("/projects", get(handlers::projects::list))
        .route("/project/{id}", get(handlers::projects::show))
        .route("/edit_project/{id}", get(handlers::projects::edit))
        .route("/save_project", post(handlers::projects::save))
        .route("/delete_project/{id}", get(handlers::projects::delete))
        .route("/log", get(handlers::work::log))
        .route("/edit_log/{id}", get(handlers::work::edit))
        .route("/save_work", post(handlers::work::save))
        .route("/work_entry/{id}", get(handlers::work::show))
        .route("/delete_work/{id}", get(handlers::work::delete))
        .route("/contacts", get(handlers::contacts::list))
        .route("/contact/{id}", get(handlers::contacts::show))
        .route("/edit_contact/{id}", get(handlers::contacts::edit))
        .route("/save_contact", post(handlers::contacts::save))
        .route("/delete_contact/{id}", get(handlers::contacts::delete))
        .route(
            "/add_contact_project/{contact_id}",
            post(handlers::contacts::add_project_link),
        )
        .route(
            "/del_contact_project",
            get(handlers::contacts::delete_project_link),
        )
        .route("/reports", get(handlers::reports::menu))
        .route("/calendar", get(handlers::calendar::month))
        .nest_service("/static", ServeDir::new(&static_dir))
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.ico")))
        .route_service("/robots.txt", ServeFile::new(static_dir.join("robots.txt")))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    info!(
        "event=http_request module=web method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
