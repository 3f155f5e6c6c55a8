mod common;

use axum::http::StatusCode;
use common::{assert_redirect, body_text, TestApp};
use timelog_core::{
    Project, ProjectCategory, ProjectRepository, SqliteProjectRepository, SqliteWorkRepository,
    WorkEntry, WorkRepository,
};

fn seed_project(app: &TestApp, name: &str, active: bool) -> i64 {
    let conn = app.conn();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();
    repo.save_project(&Project {
        client: "Acme".to_string(),
        name: name.to_string(),
        category: ProjectCategory::Billable,
        active,
        ..Project::new_draft()
    })
    .unwrap()
}

#[tokio::test]
async fn empty_project_list_renders() {
    let app = TestApp::new();
    let body = app.page("/").await;
    assert!(body.contains("No projects."));
    assert!(body.contains("/static/bulma/css/bulma.css"));
}

#[tokio::test]
async fn list_filters_by_active_flag() {
    let app = TestApp::new();
    seed_project(&app, "Running", true);
    seed_project(&app, "Archived", false);

    let active = app.page("/projects").await;
    assert!(active.contains("Running"));
    assert!(!active.contains("Archived"));

    let inactive = app.page("/projects?filter=inactive").await;
    assert!(!inactive.contains("Running"));
    assert!(inactive.contains("Archived"));

    let all = app.page("/projects?filter=all").await;
    assert!(all.contains("Running") && all.contains("Archived"));
}

#[tokio::test]
async fn saving_a_new_project_redirects_to_its_page() {
    let app = TestApp::new();
    let response = app
        .post_form(
            "/save_project",
            "id=0&client=Acme&name=Website+rebuild&category=IP&description=Phase+one&active=on",
        )
        .await;
    assert_redirect(&response, "/project/1");

    let body = app.page("/project/1").await;
    assert!(body.contains("Website rebuild"));
    assert!(body.contains("Phase one"));
    assert!(body.contains("Work entries (0, 0.00 hours)"));

    let conn = app.conn();
    let stored = SqliteProjectRepository::try_new(&conn)
        .unwrap()
        .get_project(1)
        .unwrap()
        .unwrap();
    assert_eq!(stored.category, ProjectCategory::Ip);
    assert!(stored.active);
}

#[tokio::test]
async fn project_page_totals_its_work() {
    let app = TestApp::new();
    let project_id = seed_project(&app, "Support", true);
    {
        let conn = app.conn();
        let repo = SqliteWorkRepository::try_new(&conn).unwrap();
        for (date, hours) in [("2025-02-03", 1.5), ("2025-02-04", 2.0)] {
            repo.save_work(&WorkEntry {
                project_id,
                work_date: date.to_string(),
                hours,
                ..WorkEntry::new_draft(chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
            })
            .unwrap();
        }
    }

    let body = app.page(&format!("/project/{project_id}")).await;
    assert!(body.contains("Work entries (2, 3.50 hours)"));
    assert!(body.contains("2025-02-03"));
}

#[tokio::test]
async fn bad_and_missing_ids_map_to_400_and_404() {
    let app = TestApp::new();

    let response = app.get("/project/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Invalid project ID");

    assert_eq!(app.get("/project/99").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/edit_project/99").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/delete_project/99").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_project_forms_are_rejected() {
    let app = TestApp::new();

    let blank_name = app.post_form("/save_project", "id=0&name=++&category=Other").await;
    assert_eq!(blank_name.status(), StatusCode::BAD_REQUEST);

    let bad_id = app.post_form("/save_project", "id=x&name=Site").await;
    assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);

    let unknown_update = app.post_form("/save_project", "id=5&name=Site").await;
    assert_eq!(unknown_update.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn new_project_form_defaults_to_active() {
    let app = TestApp::new();
    let body = app.page("/edit_project/0").await;
    assert!(body.contains("New project"));
    assert!(body.contains(r#"name="active" checked"#));
}

#[tokio::test]
async fn delete_project_redirects_to_list() {
    let app = TestApp::new();
    let id = seed_project(&app, "Short lived", true);

    let response = app.get(&format!("/delete_project/{id}")).await;
    assert_redirect(&response, "/projects");
    assert_eq!(
        app.get(&format!("/project/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );
}
