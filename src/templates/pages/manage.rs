// templates/pages/manage.rs

use maud::{html, Markup};

use crate::domain::property::PropertyRecord;
use crate::templates::components::owner_property_card;
use crate::templates::layouts::desktop::{desktop_layout, PageChrome};

pub fn manage_page(chrome: &PageChrome, properties: &[PropertyRecord]) -> Markup {
    desktop_layout(
        "My Properties",
        chrome,
        html! {
            main class="container" {
                h1 { "My Properties" }

                @if properties.is_empty() {
                    div class="empty-state" style="text-align: center; padding: 3rem 0;" {
                        h3 { "You haven't listed any properties yet" }
                        a href="/add" class="btn" { "Add your first property" }
                    }
                } @else {
                    div class="property-grid" {
                        @for property in properties {
                            (owner_property_card(property))
                        }
                    }
                }
            }
        },
    )
}
