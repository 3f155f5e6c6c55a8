//! Mapping from core failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};
use timelog_core::db::DbError;
use timelog_core::{CalendarError, RepoError, WorkServiceError};
use tokio::task::JoinError;

/// Request failure rendered as a short plain-text response.
#[derive(Debug)]
pub enum WebError {
    /// Unparseable input or a record that failed validation.
    BadRequest(String),
    NotFound(String),
    Repo(RepoError),
    Calendar(CalendarError),
    /// The blocking storage task panicked or was cancelled.
    Task(String),
}

impl WebError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Calendar(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Repo(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for WebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => write!(f, "{message}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Calendar(err) => write!(f, "{err}"),
            Self::Task(message) => write!(f, "storage task failed: {message}"),
        }
    }
}

impl Error for WebError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Calendar(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for WebError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound(format!("{entity} {id} not found")),
            RepoError::Validation(err) => Self::BadRequest(err.to_string()),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for WebError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

impl From<WorkServiceError> for WebError {
    fn from(value: WorkServiceError) -> Self {
        match value {
            WorkServiceError::Repo(err) => err.into(),
            WorkServiceError::Calendar(err) => Self::Calendar(err),
        }
    }
}

impl From<JoinError> for WebError {
    fn from(value: JoinError) -> Self {
        Self::Task(value.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=http_error module=web status=error code={} error={}",
                status.as_u16(),
                self
            );
        }
        (status, self.to_string()).into_response()
    }
}
