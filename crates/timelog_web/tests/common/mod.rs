#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use timelog_web::{router, AppState, ServerConfig};
use tower::ServiceExt;

/// Router over a fresh database file and a static dir holding a stub Bulma.
pub struct TestApp {
    pub dir: TempDir,
    pub db_path: PathBuf,
    pub app: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    pub fn with_env(extra: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("timelog.db");
        let static_dir = dir.path().join("static");
        fs::create_dir_all(static_dir.join("bulma/css")).unwrap();
        fs::write(static_dir.join("bulma/css/bulma.css"), "/* bulma */").unwrap();
        fs::write(static_dir.join("robots.txt"), "User-agent: *\nDisallow:\n").unwrap();

        let db_text = db_path.to_string_lossy().into_owned();
        let static_text = static_dir.to_string_lossy().into_owned();
        let config = ServerConfig::from_lookup(|key| match key {
            "TIMELOG_DB" => Some(db_text.clone()),
            "TIMELOG_STATIC_DIR" => Some(static_text.clone()),
            _ => extra
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string()),
        })
        .unwrap();

        Self {
            app: router(AppState::new(config)),
            db_path,
            dir,
        }
    }

    pub fn conn(&self) -> rusqlite::Connection {
        timelog_core::db::open_db(&self.db_path).unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// GETs `uri`, asserts `200` and returns the body text.
    pub async fn page(&self, uri: &str) -> String {
        let response = self.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        body_text(response).await
    }
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Asserts a `303 See Other` to `location`.
pub fn assert_redirect(response: &Response<Body>, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], location);
}
