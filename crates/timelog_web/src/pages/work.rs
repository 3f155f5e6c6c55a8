use super::{hours, layout, yes_no, Nav};
use maud::{html, Markup};
use timelog_core::{Project, WorkEntry};

pub(crate) fn detail_page(entry: &WorkEntry) -> Markup {
    let body = html! {
        div.box {
            p {
                strong { "Project: " }
                a href=(format!("/project/{}", entry.project_id)) {
                    @if entry.project_name.is_empty() {
                        "#" (entry.project_id)
                    } @else {
                        (entry.client) " / " (entry.project_name)
                    }
                }
            }
            p { strong { "Date: " } (entry.work_date) }
            p { strong { "Hours: " } (hours(entry.hours)) }
            p { strong { "Billable: " } (yes_no(entry.billable)) }
            @if !entry.description.is_empty() {
                p.mt-2 { (entry.description) }
            }
            div.buttons.mt-4 {
                a.button.is-link href=(format!("/edit_log/{}", entry.id)) { "Edit" }
                a.button.is-danger.is-outlined href=(format!("/delete_work/{}", entry.id)) { "Delete" }
                a.button href="/log" { "Back to log" }
            }
        }
    };
    layout("Work entry", Nav::Log, body)
}

pub(crate) fn edit_page(entry: &WorkEntry, projects: &[Project]) -> Markup {
    let title = if entry.id == 0 { "New work entry" } else { "Edit work entry" };
    let body = html! {
        form method="post" action="/save_work" {
            input type="hidden" name="id" value=(entry.id);
            div.field {
                label.label for="project_id" { "Project" }
                div.control {
                    div.select {
                        select #project_id name="project_id" required {
                            option value="" selected[entry.project_id == 0] { "Choose a project" }
                            @for project in projects {
                                option value=(project.id) selected[project.id == entry.project_id] {
                                    (project.client) " / " (project.name)
                                }
                            }
                        }
                    }
                }
            }
            div.field {
                label.label for="work_date" { "Date" }
                div.control { input.input #work_date type="date" name="work_date" value=(entry.work_date); }
            }
            div.field {
                label.label for="hours" { "Hours" }
                div.control {
                    input.input #hours type="number" name="hours" step="0.25" min="0" value=(entry.hours);
                }
            }
            div.field {
                label.checkbox {
                    input type="checkbox" name="billable" checked[entry.billable];
                    " Billable"
                }
            }
            div.field {
                label.label for="description" { "Description" }
                div.control { textarea.textarea #description name="description" { (entry.description) } }
            }
            div.buttons {
                button.button.is-primary type="submit" { "Save" }
                a.button href="/log" { "Cancel" }
            }
        }
    };
    layout(title, Nav::Log, body)
}
