use super::{hours, layout, Nav};
use chrono::NaiveDate;
use maud::{html, Markup};
use timelog_core::{ActivityLog, AnnotatedEntry, Period};

fn period_name(period: Period) -> &'static str {
    match period {
        Period::Day => "Day",
        Period::Week => "Week",
        Period::Month => "Month",
    }
}

fn row_class(period: Period) -> &'static str {
    match period {
        Period::Day => "subtotal subtotal-day",
        Period::Week => "subtotal subtotal-week has-background-light",
        Period::Month => "subtotal subtotal-month has-background-grey-lighter",
    }
}

/// Subtotal rows rendered after an entry, narrowest period first.
fn subtotal_rows(annotated: &AnnotatedEntry) -> Markup {
    html! {
        @for period in Period::ALL {
            @if let Some(total) = annotated.total(period) {
                tr class=(row_class(period)) {
                    td colspan="3" {
                        em { (period_name(period)) " " (total.label) }
                    }
                    td.has-text-right { strong { (hours(total.hours)) } }
                    td colspan="2" {}
                }
            }
        }
    }
}

pub(crate) fn log_page(log: &ActivityLog, since: NaiveDate) -> Markup {
    let body = html! {
        div.level {
            div.level-left {
                p.subtitle.is-6 { "Entries since " (since.format("%Y-%m-%d")) }
            }
            div.level-right {
                a.button.is-primary href="/edit_log/0" { "New entry" }
            }
        }
        @if !log.skipped.is_empty() {
            div.notification.is-warning.is-light {
                "Skipped " (log.skipped.len()) " entries with unreadable dates: "
                @for (index, skipped) in log.skipped.iter().enumerate() {
                    @if index > 0 { ", " }
                    a href=(format!("/work_entry/{}", skipped.id)) { "#" (skipped.id) }
                    " (" (skipped.work_date) ")"
                }
            }
        }
        table.table.is-fullwidth.is-narrow {
            thead {
                tr {
                    th { "Date" }
                    th { "Client" }
                    th { "Project" }
                    th.has-text-right { "Hours" }
                    th { "Billable" }
                    th { "Description" }
                }
            }
            tbody {
                @for annotated in &log.entries {
                    @let entry = &annotated.entry;
                    tr {
                        td { a href=(format!("/work_entry/{}", entry.id)) { (entry.work_date) } }
                        td { (entry.client) }
                        td { a href=(format!("/project/{}", entry.project_id)) { (entry.project_name) } }
                        td.has-text-right { (hours(entry.hours)) }
                        td { @if entry.billable { "$" } }
                        td { (entry.description) }
                    }
                    (subtotal_rows(annotated))
                }
            }
        }
    };
    layout("Log", Nav::Log, body)
}
