// templates/pages/home.rs

use maud::{html, Markup};

use crate::domain::property::PropertyRecord;
use crate::templates::components::property_card;
use crate::templates::layouts::desktop::{desktop_layout, PageChrome};

pub fn home_page(chrome: &PageChrome, properties: &[PropertyRecord], query: &str) -> Markup {
    desktop_layout(
        "Home",
        chrome,
        html! {
            main class="container" {
                section class="search-bar" {
                    form action="/" method="get" style="display: flex; gap: 10px;" {
                        input type="text"
                              name="q"
                              value=(query)
                              placeholder="Search by title or location..."
                              style="flex: 1; padding: 8px;";
                        button type="submit" { "Search" }
                    }
                }

                @if properties.is_empty() {
                    div class="empty-state" style="text-align: center; padding: 3rem 0;" {
                        h3 { "No properties found" }
                        @if query.is_empty() {
                            p class="text-muted" { "Be the first to list one." }
                            a href="/add" class="btn" { "Add Property" }
                        } @else {
                            p class="text-muted" { "Nothing matched " strong { (query) } "." }
                            a href="/" class="btn" { "View All Properties" }
                        }
                    }
                } @else {
                    div class="property-grid" {
                        @for property in properties {
                            (property_card(property))
                        }
                    }
                }
            }
        },
    )
}
