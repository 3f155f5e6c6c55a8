use chrono::NaiveDate;
use std::collections::HashMap;
use timelog_core::db::open_db_in_memory;
use timelog_core::{
    annotate_entries, Period, Project, ProjectRepository, SqliteProjectRepository,
    SqliteWorkRepository, WorkEntry, WorkRepository, WorkService,
};

fn entry(id: i64, date: &str, hours: f64) -> WorkEntry {
    WorkEntry {
        id,
        project_id: 1,
        work_date: date.to_string(),
        hours,
        billable: true,
        description: String::new(),
        project_name: "Website".to_string(),
        client: "Acme".to_string(),
    }
}

fn sample() -> Vec<WorkEntry> {
    vec![
        entry(1, "2024-12-30", 1.0),
        entry(2, "2024-12-31", 2.0),
        entry(3, "2025-01-01", 2.0),
        entry(4, "2025-01-01", 3.0),
        entry(5, "2025-01-06", 4.0),
        entry(6, "2025-01-31", 0.5),
        entry(7, "2025-02-01", 1.5),
        entry(8, "2025-02-01", 0.25),
    ]
}

#[test]
fn worked_example_closes_days_on_their_last_entry() {
    let log = annotate_entries(vec![
        entry(1, "2025-01-01", 2.0),
        entry(2, "2025-01-01", 3.0),
        entry(3, "2025-01-02", 1.0),
    ]);

    assert_eq!(log.entries.len(), 3);
    assert!(!log.entries[0].closes(Period::Day));

    let first_day = log.entries[1].day_total.as_ref().unwrap();
    assert_eq!(first_day.label, "2025-01-01");
    assert_eq!(first_day.hours, 5.0);
    assert!(!log.entries[1].closes(Period::Week));
    assert!(!log.entries[1].closes(Period::Month));

    let last = &log.entries[2];
    assert_eq!(last.day_total.as_ref().unwrap().hours, 1.0);
    assert_eq!(last.week_total.as_ref().unwrap().label, "2025-W01");
    assert_eq!(last.week_total.as_ref().unwrap().hours, 6.0);
    assert_eq!(last.month_total.as_ref().unwrap().label, "2025-01");
    assert_eq!(last.month_total.as_ref().unwrap().hours, 6.0);
}

#[test]
fn every_period_is_closed_exactly_once_with_its_sum() {
    let input = sample();
    let log = annotate_entries(input.clone());
    assert_eq!(log.entries.len(), input.len());

    for period in Period::ALL {
        let mut expected: HashMap<String, f64> = HashMap::new();
        for item in &input {
            let date = item.date().unwrap();
            *expected.entry(period.label(date)).or_default() += item.hours;
        }

        let closings: Vec<_> = log
            .entries
            .iter()
            .filter_map(|annotated| annotated.total(period))
            .collect();
        assert_eq!(closings.len(), expected.len(), "{period:?}");
        for total in closings {
            assert_eq!(Some(&total.hours), expected.get(&total.label), "{period:?}");
        }
    }
}

#[test]
fn closings_sit_on_the_last_entry_of_each_period() {
    let log = annotate_entries(sample());

    for (index, annotated) in log.entries.iter().enumerate() {
        let date = annotated.entry.date().unwrap();
        let next_date = log.entries.get(index + 1).and_then(|next| next.entry.date());
        for period in Period::ALL {
            let ends_here = match next_date {
                Some(next) => period.label(next) != period.label(date),
                None => true,
            };
            assert_eq!(annotated.closes(period), ends_here, "{period:?} at {index}");
            if let Some(total) = annotated.total(period) {
                assert_eq!(total.label, period.label(date));
            }
        }
    }
}

#[test]
fn iso_week_spans_the_year_boundary() {
    let log = annotate_entries(sample());

    // 2024-12-30 .. 2025-01-01 all fall in ISO week 2025-W01.
    assert!(!log.entries[1].closes(Period::Week));
    let week_one = log.entries[3].week_total.as_ref().unwrap();
    assert_eq!(week_one.label, "2025-W01");
    assert_eq!(week_one.hours, 8.0);

    // The calendar month still changes at December 31.
    let december = log.entries[1].month_total.as_ref().unwrap();
    assert_eq!(december.label, "2024-12");
    assert_eq!(december.hours, 3.0);
}

#[test]
fn order_is_preserved_and_last_entry_closes_everything() {
    let log = annotate_entries(sample());
    let ids: Vec<_> = log.entries.iter().map(|a| a.entry.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);

    let last = log.entries.last().unwrap();
    assert!(Period::ALL.iter().all(|period| last.closes(*period)));
    assert_eq!(last.month_total.as_ref().unwrap().hours, 1.75);
}

#[test]
fn malformed_dates_are_dropped_and_reported() {
    let log = annotate_entries(vec![
        entry(1, "2025-01-01", 1.0),
        entry(2, "2025-01-01", 1.0),
        entry(3, "not-a-date", 9.0),
        entry(4, "2025-01-02", 1.0),
        entry(5, "2025-01-02", 1.0),
    ]);

    assert_eq!(log.entries.len(), 4);
    assert_eq!(log.skipped.len(), 1);
    assert_eq!(log.skipped[0].id, 3);
    assert_eq!(log.skipped[0].work_date, "not-a-date");
    assert_eq!(log.entries[1].day_total.as_ref().unwrap().hours, 2.0);
    assert_eq!(log.entries[3].month_total.as_ref().unwrap().hours, 4.0);
}

#[test]
fn hours_are_not_rounded() {
    let log = annotate_entries(vec![
        entry(1, "2025-05-05", 0.1),
        entry(2, "2025-05-05", 0.2),
    ]);
    assert_eq!(log.entries[1].day_total.as_ref().unwrap().hours, 0.1 + 0.2);
}

#[test]
fn service_builds_log_from_entries_since_cutoff() {
    let conn = open_db_in_memory().unwrap();
    let project_id = SqliteProjectRepository::try_new(&conn)
        .unwrap()
        .save_project(&Project {
            name: "Website".to_string(),
            ..Project::new_draft()
        })
        .unwrap();
    let repo = SqliteWorkRepository::try_new(&conn).unwrap();
    for (date, hours) in [("2024-12-31", 8.0), ("2025-01-02", 1.0), ("2025-01-02", 2.0)] {
        let mut draft = WorkEntry::new_draft(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        draft.project_id = project_id;
        draft.work_date = date.to_string();
        draft.hours = hours;
        repo.save_work(&draft).unwrap();
    }
    conn.execute(
        "INSERT INTO work (project_id, work_date, hours, billable, description)
         VALUES (?1, 'someday', 1, 1, '');",
        [project_id],
    )
    .unwrap();

    let service = WorkService::new(repo);
    let log = service
        .activity_log(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        .unwrap();

    assert_eq!(log.entries.len(), 2);
    assert_eq!(log.skipped.len(), 1);
    let last = log.entries.last().unwrap();
    assert_eq!(last.day_total.as_ref().unwrap().hours, 3.0);
    assert_eq!(last.entry.project_name, "Website");
}
