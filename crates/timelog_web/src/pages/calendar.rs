use super::{hours, layout, Nav};
use maud::{html, Markup};
use timelog_core::{MonthGrid, MonthRef};

const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn month_href(target: MonthRef) -> String {
    format!("/calendar?year={}&month={}", target.year, target.month)
}

pub(crate) fn month_page(grid: &MonthGrid) -> Markup {
    let title = grid.title();
    let body = html! {
        nav.level {
            div.level-left {
                a.button href=(month_href(grid.prev)) { "< Previous" }
            }
            div.level-item {
                p.subtitle { (title) }
            }
            div.level-right {
                a.button href=(month_href(grid.next)) { "Next >" }
            }
        }
        table.table.is-bordered.is-fullwidth.calendar {
            thead {
                tr {
                    @for name in WEEKDAY_HEADERS {
                        th.has-text-centered { (name) }
                    }
                }
            }
            tbody {
                @for week in &grid.weeks {
                    tr {
                        @for slot in week {
                            @match slot {
                                Some(cell) => {
                                    td.calendar-day {
                                        p.has-text-weight-bold { (cell.day) }
                                        @for entry in &cell.entries {
                                            a href=(format!("/work_entry/{}", entry.id)) {
                                                span class=(format!("tag {}", grid.color_for(entry.project_id))) title=(entry.description) {
                                                    (entry.project_name) " " (hours(entry.hours))
                                                }
                                            }
                                            br;
                                        }
                                    }
                                }
                                None => {
                                    td.calendar-blank.has-background-white-ter {}
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    layout(&title, Nav::Calendar, body)
}
