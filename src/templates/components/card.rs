use maud::{html, Markup};

use crate::domain::property::PropertyRecord;
use crate::templates::format::{format_date, price_or_zero};

/// Listing card shown on the home page grid.
pub fn property_card(property: &PropertyRecord) -> Markup {
    let posted = format_date(property.created_at).unwrap_or_else(|| "Unknown date".to_string());

    html! {
        div class="card property-card" {
            img src=(property.display_image_url()) alt=(property.title) class="property-image";
            div class="card-body" {
                h5 class="card-title" { (property.title) }
                p class="property-price" { (price_or_zero(property.price)) }
                p class="property-location" { (property.effective_location()) }
                @if let Some(desc) = &property.description {
                    p class="property-description" { (desc) }
                }
                small class="text-muted" { "Posted on " (posted) }
            }
        }
    }
}

/// Variant for the owner's manage page: same card plus edit/delete
/// controls.
pub fn owner_property_card(property: &PropertyRecord) -> Markup {
    html! {
        div class="card property-card" {
            (property_card_body(property))
            div class="card-footer" {
                a href=(format!("/properties/{}/edit", property.id)) class="btn btn-outline" { "Edit" }
                form action=(format!("/properties/{}/delete", property.id))
                     method="post"
                     onsubmit="return confirm('Delete this property?');"
                     style="display: inline;" {
                    button type="submit" class="btn btn-danger" { "Delete" }
                }
            }
        }
    }
}

fn property_card_body(property: &PropertyRecord) -> Markup {
    let posted = format_date(property.created_at).unwrap_or_else(|| "Unknown date".to_string());

    html! {
        img src=(property.display_image_url()) alt=(property.title) class="property-image";
        div class="card-body" {
            h5 class="card-title" { (property.title) }
            p class="property-price" { (price_or_zero(property.price)) }
            p class="property-location" { (property.effective_location()) }
            small class="text-muted" { "Posted on " (posted) }
        }
    }
}

/// Headline number on the admin dashboard.
pub fn stat_card(label: &str, value: &str) -> Markup {
    html! {
        div class="card stat-card" {
            h3 { (value) }
            p class="text-muted" { (label) }
        }
    }
}
