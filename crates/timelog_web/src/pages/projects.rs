use super::{hours, layout, yes_no, Nav};
use maud::{html, Markup};
use timelog_core::{Contact, Project, ProjectCategory, ProjectFilter, ProjectWork};

const FILTERS: [(ProjectFilter, &str); 3] = [
    (ProjectFilter::Active, "Active"),
    (ProjectFilter::Inactive, "Inactive"),
    (ProjectFilter::All, "All"),
];

pub(crate) fn list_page(projects: &[Project], filter: ProjectFilter) -> Markup {
    let body = html! {
        div.level {
            div.level-left {
                div.tabs.is-toggle.is-small {
                    ul {
                        @for (option, label) in FILTERS {
                            li.is-active[option == filter] {
                                a href=(format!("/projects?filter={}", option.as_str())) { (label) }
                            }
                        }
                    }
                }
            }
            div.level-right {
                a.button.is-primary href="/edit_project/0" { "New project" }
            }
        }
        @if projects.is_empty() {
            p.has-text-grey { "No projects." }
        } @else {
            table.table.is-fullwidth.is-striped.is-hoverable {
                thead {
                    tr { th { "Client" } th { "Name" } th { "Category" } th { "Active" } }
                }
                tbody {
                    @for project in projects {
                        tr {
                            td { (project.client) }
                            td { a href=(format!("/project/{}", project.id)) { (project.name) } }
                            td { (project.category.as_str()) }
                            td { (yes_no(project.active)) }
                        }
                    }
                }
            }
        }
    };
    layout("Projects", Nav::Projects, body)
}

pub(crate) fn detail_page(project: &Project, work: &ProjectWork, contacts: &[Contact]) -> Markup {
    let body = html! {
        div.box {
            p { strong { "Client: " } (project.client) }
            p { strong { "Category: " } (project.category.as_str()) }
            p { strong { "Active: " } (yes_no(project.active)) }
            @if !project.description.is_empty() {
                p.mt-2 { (project.description) }
            }
            div.buttons.mt-4 {
                a.button.is-link href=(format!("/edit_project/{}", project.id)) { "Edit" }
                a.button.is-danger.is-outlined href=(format!("/delete_project/{}", project.id)) {
                    "Delete"
                }
            }
        }

        h2.subtitle { "Contacts" }
        @if contacts.is_empty() {
            p.has-text-grey.mb-4 { "No linked contacts." }
        } @else {
            ul.mb-4 {
                @for contact in contacts {
                    li { a href=(format!("/contact/{}", contact.id)) { (contact.display_name()) } }
                }
            }
        }

        h2.subtitle {
            "Work entries (" (work.total_count) ", " (hours(work.total_hours)) " hours)"
        }
        table.table.is-fullwidth.is-striped {
            thead {
                tr { th { "Date" } th { "Hours" } th { "Billable" } th { "Description" } }
            }
            tbody {
                @for entry in &work.entries {
                    tr {
                        td { a href=(format!("/work_entry/{}", entry.id)) { (entry.work_date) } }
                        td.has-text-right { (hours(entry.hours)) }
                        td { (yes_no(entry.billable)) }
                        td { (entry.description) }
                    }
                }
            }
        }
    };
    layout(&project.name, Nav::Projects, body)
}

pub(crate) fn edit_page(project: &Project) -> Markup {
    let title = if project.id == 0 { "New project" } else { "Edit project" };
    let body = html! {
        form method="post" action="/save_project" {
            input type="hidden" name="id" value=(project.id);
            div.field {
                label.label for="client" { "Client" }
                div.control { input.input #client type="text" name="client" value=(project.client); }
            }
            div.field {
                label.label for="name" { "Name" }
                div.control { input.input #name type="text" name="name" required value=(project.name); }
            }
            div.field {
                label.label for="category" { "Category" }
                div.control {
                    div.select {
                        select #category name="category" {
                            @for category in ProjectCategory::ALL {
                                option value=(category.as_str()) selected[category == project.category] {
                                    (category.as_str())
                                }
                            }
                        }
                    }
                }
            }
            div.field {
                label.label for="description" { "Description" }
                div.control { textarea.textarea #description name="description" { (project.description) } }
            }
            div.field {
                label.checkbox {
                    input type="checkbox" name="active" checked[project.active];
                    " Active"
                }
            }
            div.buttons {
                button.button.is-primary type="submit" { "Save" }
                a.button href="/projects" { "Cancel" }
            }
        }
    };
    layout(title, Nav::Projects, body)
}
