//! Server-rendered HTML pages.
//!
//! Every page shares `layout`: Bulma from `/static`, a navbar and one
//! `section.section` body.

use maud::{html, Markup, DOCTYPE};

pub(crate) mod calendar;
pub(crate) mod contacts;
pub(crate) mod log;
pub(crate) mod projects;
pub(crate) mod reports;
pub(crate) mod work;

/// Navbar entry highlighted for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Nav {
    Projects,
    Log,
    Calendar,
    Contacts,
    Reports,
}

const NAV_LINKS: [(Nav, &str, &str); 5] = [
    (Nav::Projects, "/projects", "Projects"),
    (Nav::Log, "/log", "Log"),
    (Nav::Calendar, "/calendar", "Calendar"),
    (Nav::Contacts, "/contacts", "Contacts"),
    (Nav::Reports, "/reports", "Reports"),
];

pub(crate) fn layout(title: &str, current: Nav, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Timelog" }
                link rel="stylesheet" href="/static/bulma/css/bulma.css";
                link rel="icon" href="/favicon.ico";
            }
            body {
                nav.navbar.is-dark role="navigation" aria-label="main navigation" {
                    div.navbar-brand {
                        a.navbar-item href="/" { strong { "Timelog" } }
                    }
                    div.navbar-menu {
                        div.navbar-start {
                            @for (nav, href, label) in NAV_LINKS {
                                a.navbar-item.is-active[nav == current] href=(href) { (label) }
                            }
                        }
                    }
                }
                section.section {
                    div.container {
                        h1.title { (title) }
                        (body)
                    }
                }
            }
        }
    }
}

/// Hours with two decimals, as shown in every table.
pub(crate) fn hours(value: f64) -> String {
    format!("{value:.2}")
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}
