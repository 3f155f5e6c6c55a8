mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{assert_redirect, body_text, TestApp};
use timelog_core::{
    Project, ProjectRepository, SqliteProjectRepository, SqliteWorkRepository, WorkEntry,
    WorkRepository,
};

fn seed_project(app: &TestApp, name: &str, active: bool) -> i64 {
    let conn = app.conn();
    SqliteProjectRepository::try_new(&conn)
        .unwrap()
        .save_project(&Project {
            client: "Acme".to_string(),
            name: name.to_string(),
            active,
            ..Project::new_draft()
        })
        .unwrap()
}

fn seed_work(app: &TestApp, project_id: i64, date: &str, hours: f64) -> i64 {
    let conn = app.conn();
    SqliteWorkRepository::try_new(&conn)
        .unwrap()
        .save_work(&WorkEntry {
            project_id,
            work_date: date.to_string(),
            hours,
            description: format!("work on {date}"),
            ..WorkEntry::new_draft(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        })
        .unwrap()
}

#[tokio::test]
async fn log_shows_day_week_and_month_subtotals() {
    let app = TestApp::new();
    let project = seed_project(&app, "Website", true);
    seed_work(&app, project, "2025-01-01", 2.0);
    seed_work(&app, project, "2025-01-01", 3.0);
    seed_work(&app, project, "2025-01-02", 1.0);
    seed_work(&app, project, "2024-12-31", 8.0);

    let body = app.page("/log").await;
    assert!(body.contains("<em>Day 2025-01-01</em>"));
    assert!(body.contains("<em>Day 2025-01-02</em>"));
    assert!(body.contains("<em>Week 2025-W01</em>"));
    assert!(body.contains("<em>Month 2025-01</em>"));
    assert!(body.contains("<strong>5.00</strong>"));
    assert!(body.contains("<strong>6.00</strong>"));
    // Before the configured cutoff.
    assert!(!body.contains("2024-12-31"));
}

#[tokio::test]
async fn log_cutoff_follows_configuration() {
    let app = TestApp::with_env(&[("TIMELOG_LOG_SINCE", "2024-12-01")]);
    let project = seed_project(&app, "Website", true);
    seed_work(&app, project, "2024-12-31", 8.0);

    let body = app.page("/log").await;
    assert!(body.contains("Entries since 2024-12-01"));
    assert!(body.contains("<em>Month 2024-12</em>"));
}

#[tokio::test]
async fn saving_work_redirects_to_the_entry() {
    let app = TestApp::new();
    let project = seed_project(&app, "Website", true);

    let response = app
        .post_form(
            "/save_work",
            &format!(
                "id=&project_id={project}&work_date=2025-03-04&hours=2.5&billable=on&description=Deploy"
            ),
        )
        .await;
    assert_redirect(&response, "/work_entry/1");

    let body = app.page("/work_entry/1").await;
    assert!(body.contains("Acme / Website"));
    assert!(body.contains("2025-03-04"));
    assert!(body.contains("2.50"));
    assert!(body.contains("Deploy"));

    let update = app
        .post_form(
            "/save_work",
            &format!("id=1&project_id={project}&work_date=2025-03-05&hours=1&description=Deploy"),
        )
        .await;
    assert_redirect(&update, "/work_entry/1");
    let conn = app.conn();
    let stored = SqliteWorkRepository::try_new(&conn)
        .unwrap()
        .get_work(1)
        .unwrap()
        .unwrap();
    assert_eq!(stored.work_date, "2025-03-05");
    assert!(!stored.billable);
}

#[tokio::test]
async fn invalid_work_forms_are_rejected() {
    let app = TestApp::new();
    let project = seed_project(&app, "Website", true);

    let hours = app
        .post_form(
            "/save_work",
            &format!("id=0&project_id={project}&work_date=2025-03-04&hours=two"),
        )
        .await;
    assert_eq!(hours.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(hours).await, "Invalid hours");

    let negative = app
        .post_form(
            "/save_work",
            &format!("id=0&project_id={project}&work_date=2025-03-04&hours=-1"),
        )
        .await;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

    let missing_project = app
        .post_form("/save_work", "id=0&project_id=42&work_date=2025-03-04&hours=1")
        .await;
    assert_eq!(missing_project.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_form_offers_only_active_projects() {
    let app = TestApp::new();
    seed_project(&app, "Current", true);
    let retired = seed_project(&app, "Retired", false);

    let body = app.page("/edit_log/0").await;
    assert!(body.contains("New work entry"));
    assert!(body.contains("Current"));
    assert!(!body.contains("Retired"));
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert!(body.contains(&format!(r#"value="{today}""#)));

    // An entry on a retired project still shows its own project.
    let id = seed_work(&app, retired, "2025-02-02", 1.0);
    let body = app.page(&format!("/edit_log/{id}")).await;
    assert!(body.contains("Retired"));
}

#[tokio::test]
async fn deleting_work_returns_to_the_log() {
    let app = TestApp::new();
    let project = seed_project(&app, "Website", true);
    let id = seed_work(&app, project, "2025-02-02", 1.0);

    assert_redirect(&app.get(&format!("/delete_work/{id}")).await, "/log");
    assert_eq!(
        app.get(&format!("/work_entry/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );
    let bad = app.get("/delete_work/one").await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(bad).await, "Invalid work entry ID");
}

#[tokio::test]
async fn calendar_renders_requested_month() {
    let app = TestApp::new();
    let project = seed_project(&app, "Website", true);
    seed_work(&app, project, "2024-02-29", 4.0);

    let body = app.page("/calendar?year=2024&month=2").await;
    assert!(body.contains("February 2024"));
    assert!(body.contains(r#"<p class="has-text-weight-bold">29</p>"#));
    assert!(body.contains("Website 4.00"));
    assert!(body.contains("year=2024&amp;month=1"));
    assert!(body.contains("year=2024&amp;month=3"));
    // February 2024 starts on a Thursday: four leading blanks.
    assert_eq!(body.matches("calendar-blank").count(), 4 + 2);
}

#[tokio::test]
async fn calendar_navigation_wraps_the_year() {
    let app = TestApp::new();
    let body = app.page("/calendar?year=2024&month=12").await;
    assert!(body.contains("December 2024"));
    assert!(body.contains("year=2025&amp;month=1"));
    assert!(body.contains("year=2024&amp;month=11"));
}

#[tokio::test]
async fn calendar_tolerates_bad_parameters() {
    let app = TestApp::new();
    let today = chrono::Local::now().date_naive();

    let body = app.page("/calendar?month=13&year=2023").await;
    assert!(body.contains(&format!("{} 2023", today.format("%B"))));

    let body = app.page("/calendar?year=soon").await;
    assert!(body.contains(&today.format("%B %Y").to_string()));

    let response = app.get("/calendar?year=300000&month=1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
