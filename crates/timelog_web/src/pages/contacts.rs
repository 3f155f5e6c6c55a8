use super::{layout, yes_no, Nav};
use maud::{html, Markup};
use timelog_core::{Contact, Project};

pub(crate) fn list_page(contacts: &[Contact]) -> Markup {
    let body = html! {
        div.buttons {
            a.button.is-primary href="/edit_contact/0" { "New contact" }
        }
        table.table.is-fullwidth.is-striped.is-hoverable {
            thead {
                tr { th { "Name" } th { "Company" } th { "Title" } th { "Active" } }
            }
            tbody {
                @for contact in contacts {
                    tr {
                        td { a href=(format!("/contact/{}", contact.id)) { (contact.display_name()) } }
                        td { (contact.company) }
                        td { (contact.title) }
                        td { (yes_no(contact.active)) }
                    }
                }
            }
        }
    };
    layout("Contacts", Nav::Contacts, body)
}

/// Multi-line text field shown one line per list item.
fn lines(value: &str) -> Markup {
    html! {
        @for line in value.lines().map(str::trim).filter(|line| !line.is_empty()) {
            (line) br;
        }
    }
}

pub(crate) fn detail_page(contact: &Contact, linked: &[Project], available: &[Project]) -> Markup {
    let body = html! {
        div.columns {
            div.column {
                div.box {
                    p { strong { "Company: " } (contact.company) }
                    p { strong { "Title: " } (contact.title) }
                    p { strong { "Source: " } (contact.source) }
                    p { strong { "Active: " } (yes_no(contact.active)) }
                    div.mt-2 { strong { "Phones" } br; (lines(&contact.phones)) }
                    div.mt-2 { strong { "Emails" } br; (lines(&contact.emails)) }
                    div.mt-2 { strong { "Address" } br; (lines(&contact.address)) }
                    @if !contact.comments.is_empty() {
                        p.mt-2 { (contact.comments) }
                    }
                    div.buttons.mt-4 {
                        a.button.is-link href=(format!("/edit_contact/{}", contact.id)) { "Edit" }
                        a.button.is-danger.is-outlined href=(format!("/delete_contact/{}", contact.id)) {
                            "Delete"
                        }
                    }
                }
            }
            div.column {
                h2.subtitle { "Projects" }
                @if linked.is_empty() {
                    p.has-text-grey { "Not linked to any project." }
                } @else {
                    table.table.is-fullwidth {
                        tbody {
                            @for project in linked {
                                tr {
                                    td { a href=(format!("/project/{}", project.id)) { (project.client) " / " (project.name) } }
                                    td.has-text-right {
                                        a.button.is-small.is-danger.is-light
                                            href=(format!("/del_contact_project?contact_id={}&project_id={}", contact.id, project.id)) {
                                            "Remove"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                @if !available.is_empty() {
                    form method="post" action=(format!("/add_contact_project/{}", contact.id)) {
                        div.field.has-addons {
                            div.control {
                                div.select {
                                    select name="project_id" {
                                        @for project in available {
                                            option value=(project.id) { (project.client) " / " (project.name) }
                                        }
                                    }
                                }
                            }
                            div.control {
                                button.button.is-link type="submit" { "Link project" }
                            }
                        }
                    }
                }
            }
        }
    };
    layout(&contact.display_name(), Nav::Contacts, body)
}

pub(crate) fn edit_page(contact: &Contact) -> Markup {
    let title = if contact.id == 0 { "New contact" } else { "Edit contact" };
    let text_fields: [(&str, &str, &str); 5] = [
        ("first_name", "First name", &contact.first_name),
        ("last_name", "Last name", &contact.last_name),
        ("company", "Company", &contact.company),
        ("title", "Title", &contact.title),
        ("source", "Source", &contact.source),
    ];
    let area_fields: [(&str, &str, &str); 4] = [
        ("phones", "Phones (one per line)", &contact.phones),
        ("emails", "Emails (one per line)", &contact.emails),
        ("address", "Address", &contact.address),
        ("comments", "Comments", &contact.comments),
    ];
    let body = html! {
        form method="post" action="/save_contact" {
            input type="hidden" name="id" value=(contact.id);
            @for (name, label, value) in text_fields {
                div.field {
                    label.label for=(name) { (label) }
                    div.control { input.input id=(name) type="text" name=(name) value=(value); }
                }
            }
            @for (name, label, value) in area_fields {
                div.field {
                    label.label for=(name) { (label) }
                    div.control { textarea.textarea id=(name) name=(name) rows="3" { (value) } }
                }
            }
            div.field {
                label.checkbox {
                    input type="checkbox" name="active" checked[contact.active];
                    " Active"
                }
            }
            div.buttons {
                button.button.is-primary type="submit" { "Save" }
                a.button href="/contacts" { "Cancel" }
            }
        }
    };
    layout(title, Nav::Contacts, body)
}
