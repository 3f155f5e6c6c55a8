use super::{layout, Nav};
use maud::{html, Markup};

const REPORTS: [(&str, &str, &str); 3] = [
    ("/log", "Activity log", "Every entry with day, week and month subtotals."),
    ("/calendar", "Calendar", "This month's work laid out by day."),
    ("/projects?filter=all", "All projects", "Active and inactive projects with their totals."),
];

pub(crate) fn menu_page() -> Markup {
    let body = html! {
        div.columns.is-multiline {
            @for (href, name, blurb) in REPORTS {
                div.column.is-one-third {
                    a.box href=(href) {
                        p.title.is-5 { (name) }
                        p { (blurb) }
                    }
                }
            }
        }
    };
    layout("Reports", Nav::Reports, body)
}
