// templates/pages/admin_dashboard.rs
//
// Live dashboard view. Every pane carries its own Result: a pane that
// failed to load renders its error in place while the rest of the page
// stays useful.

use maud::{html, Markup};

use crate::domain::property::PropertyRecord;
use crate::domain::user::UserRecord;
use crate::stats::aggregate::{LocationCount, MonthCount, PriceRangeCount};
use crate::stats::report::AggregateReport;
use crate::templates::components::stat_card;
use crate::templates::format::{format_date, format_inr, price_or_na};
use crate::templates::layouts::desktop::{desktop_layout, PageChrome};

pub struct StatCards {
    pub total_properties: i64,
    pub total_users: i64,
    pub listed_last_week: i64,
    pub average_price: i64,
}

pub struct ChartData {
    pub top_locations: Vec<LocationCount>,
    pub price_ranges: Vec<PriceRangeCount>,
    pub monthly: Vec<MonthCount>,
}

pub struct DashboardVm {
    pub email: String,
    pub stats: Result<StatCards, String>,
    /// Recent listings, or the substring-filtered set when a property
    /// query is active.
    pub properties_pane: Result<Vec<PropertyRecord>, String>,
    pub property_query: String,
    pub users_pane: Result<Vec<UserRecord>, String>,
    pub user_query: String,
    pub charts: Result<ChartData, String>,
    /// Last persisted scheduled report, if any run has completed.
    pub latest_report: Option<AggregateReport>,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    let chrome = PageChrome {
        user_email: Some(vm.email.clone()),
        is_admin: true,
    };

    desktop_layout(
        "Admin Dashboard",
        &chrome,
        html! {
            main class="container" {
                div class="page-header" style="display: flex; justify-content: space-between; align-items: center;" {
                    h1 { "Admin Dashboard" }
                    div {
                        a href="/admin" class="btn" { "Refresh" }
                        " "
                        a href="/admin/report" class="btn" { "Report JSON" }
                        form action="/admin/report" method="post" style="display: inline; margin-left: 8px;" {
                            button type="submit" { "Regenerate Report" }
                        }
                    }
                }

                (report_banner(&vm.latest_report))

                (stats_section(&vm.stats))

                (charts_section(&vm.charts))

                (properties_section(&vm.properties_pane, &vm.property_query))

                (users_section(&vm.users_pane, &vm.user_query))

                (leaderboard_section(&vm.latest_report))
            }
        },
    )
}

fn report_banner(latest: &Option<AggregateReport>) -> Markup {
    html! {
        @match latest {
            Some(report) => {
                p class="text-muted" {
                    "Last scheduled report: "
                    (format_date(Some(report.generated_at)).unwrap_or_else(|| "unknown".to_string()))
                    " · " (report.totals.property_count) " properties"
                }
            },
            None => p class="text-muted" { "No scheduled report has been generated yet." },
        }
    }
}

fn pane_error(message: &str) -> Markup {
    html! {
        p class="alert alert-danger" { "Failed to load: " (message) }
    }
}

fn stats_section(stats: &Result<StatCards, String>) -> Markup {
    html! {
        section class="stat-row" style="display: flex; gap: 1rem; margin: 1.5rem 0;" {
            @match stats {
                Ok(s) => {
                    (stat_card("Total Properties", &s.total_properties.to_string()))
                    (stat_card("Total Users", &s.total_users.to_string()))
                    (stat_card("Listed This Week", &s.listed_last_week.to_string()))
                    (stat_card("Average Price", &format_inr(s.average_price)))
                },
                Err(msg) => (pane_error(msg)),
            }
        }
    }
}

fn charts_section(charts: &Result<ChartData, String>) -> Markup {
    html! {
        section class="card" style="margin-bottom: 2rem;" {
            h3 { "Properties by Location" }
            @match charts {
                Ok(data) => {
                    (bar_rows(&data.top_locations.iter()
                        .map(|l| (l.location.clone(), l.count))
                        .collect::<Vec<_>>()))

                    h3 style="margin-top: 1.5rem;" { "Properties by Price Range" }
                    (bar_rows(&data.price_ranges.iter()
                        .map(|r| (r.range.clone(), r.count))
                        .collect::<Vec<_>>()))

                    h3 style="margin-top: 1.5rem;" { "Listings per Month" }
                    table style="width: 100%; border-collapse: collapse;" {
                        tbody {
                            @for m in &data.monthly {
                                tr {
                                    td style="padding: 4px 8px;" { (m.month) }
                                    td style="padding: 4px 8px; text-align: right;" { (m.count) }
                                }
                            }
                        }
                    }
                },
                Err(msg) => (pane_error(msg)),
            }
        }
    }
}

/// Horizontal bars scaled against the largest count in the group.
fn bar_rows(rows: &[(String, i64)]) -> Markup {
    let max = rows.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);

    html! {
        @if rows.is_empty() {
            p class="text-muted" { "No data yet." }
        }
        @for (label, count) in rows {
            div style="display: flex; align-items: center; gap: 8px; margin: 4px 0;" {
                span style="width: 140px; overflow: hidden; text-overflow: ellipsis;" { (label) }
                div style=(format!(
                    "background: #524ed2; height: 14px; width: {}%;",
                    (count * 100) / max
                )) {}
                span { (count) }
            }
        }
    }
}

fn properties_section(pane: &Result<Vec<PropertyRecord>, String>, query: &str) -> Markup {
    html! {
        section class="card" style="margin-bottom: 2rem;" {
            div style="display: flex; justify-content: space-between; align-items: center;" {
                h3 {
                    @if query.is_empty() { "Recent Properties" } @else { "Matching Properties" }
                }
                form action="/admin" method="get" style="display: flex; gap: 8px;" {
                    input type="text" name="pq" value=(query) placeholder="Search properties...";
                    button type="submit" { "Search" }
                    @if !query.is_empty() {
                        a href="/admin" class="btn" { "Clear" }
                    }
                }
            }
            @match pane {
                Ok(properties) => {
                    @if properties.is_empty() {
                        p class="text-muted" { "No properties found matching your search" }
                    } @else {
                        div style="overflow-x: auto;" {
                            table style="width: 100%; border-collapse: collapse; margin-top: 1rem;" {
                                thead {
                                    tr {
                                        th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Image" }
                                        th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Title" }
                                        th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Location" }
                                        th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Price" }
                                        th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Posted" }
                                    }
                                }
                                tbody {
                                    @for p in properties {
                                        tr {
                                            td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" {
                                                img src=(p.display_image_url()) alt="Property" width="50";
                                            }
                                            td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (p.title) }
                                            td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (p.effective_location()) }
                                            td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (price_or_na(p.price)) }
                                            td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" {
                                                (format_date(p.created_at).unwrap_or_else(|| "N/A".to_string()))
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                Err(msg) => (pane_error(msg)),
            }
        }
    }
}

fn users_section(pane: &Result<Vec<UserRecord>, String>, query: &str) -> Markup {
    html! {
        section class="card" style="margin-bottom: 2rem;" {
            div style="display: flex; justify-content: space-between; align-items: center;" {
                h3 { "Users" }
                form action="/admin" method="get" style="display: flex; gap: 8px;" {
                    input type="text" name="uq" value=(query) placeholder="Search users...";
                    button type="submit" { "Search" }
                    @if !query.is_empty() {
                        a href="/admin" class="btn" { "Clear" }
                    }
                }
            }
            @match pane {
                Ok(users) => {
                    @if users.is_empty() {
                        p class="text-muted" { "No users found matching your search" }
                    } @else {
                        table style="width: 100%; border-collapse: collapse; margin-top: 1rem;" {
                            thead {
                                tr {
                                    th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Name" }
                                    th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Email" }
                                    th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Phone" }
                                    th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Joined" }
                                }
                            }
                            tbody {
                                @for u in users {
                                    tr {
                                        td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (u.name.as_deref().unwrap_or("N/A")) }
                                        td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (u.email) }
                                        td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (u.phone.as_deref().unwrap_or("N/A")) }
                                        td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" {
                                            (format_date(u.created_at).unwrap_or_else(|| "N/A".to_string()))
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                Err(msg) => (pane_error(msg)),
            }
        }
    }
}

fn leaderboard_section(latest: &Option<AggregateReport>) -> Markup {
    html! {
        @if let Some(report) = latest {
            section class="card" style="margin-bottom: 2rem;" {
                h3 { "Most Active Owners" }
                table style="width: 100%; border-collapse: collapse; margin-top: 1rem;" {
                    thead {
                        tr {
                            th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Owner" }
                            th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "Listings" }
                            th style="padding: 8px; text-align: left; border-bottom: 2px solid #eee;" { "First Listing" }
                        }
                    }
                    tbody {
                        @for row in &report.user_leaderboard {
                            tr {
                                td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (row.email) }
                                td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" { (row.listing_count) }
                                td style="padding: 8px; border-bottom: 1px solid #f9f9f9;" {
                                    (format_date(row.earliest_listing_at).unwrap_or_else(|| "N/A".to_string()))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
