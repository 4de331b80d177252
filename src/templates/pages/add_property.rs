// templates/pages/add_property.rs

use maud::{html, Markup};

use crate::templates::layouts::desktop::{desktop_layout, PageChrome};

pub fn add_property_page(chrome: &PageChrome, error: Option<&str>) -> Markup {
    desktop_layout(
        "Add Property",
        chrome,
        html! {
            main class="container narrow" {
                h1 { "Add Property" }
                @if let Some(msg) = error {
                    p class="alert alert-danger" { (msg) }
                }
                form action="/properties" method="post" {
                    (property_form_fields("", "", "", "", "", ""))
                    button type="submit" { "Add Property" }
                }
            }
        },
    )
}

/// Shared between add and edit so the two forms can't drift apart.
pub fn property_form_fields(
    title: &str,
    price: &str,
    location: &str,
    description: &str,
    contact: &str,
    image_url: &str,
) -> Markup {
    html! {
        label for="title" { "Title" }
        input type="text" id="title" name="title" value=(title) required;

        label for="price" { "Price (₹)" }
        input type="number" id="price" name="price" value=(price) min="0" step="any";

        label for="location" { "Location" }
        input type="text" id="location" name="location" value=(location);

        label for="description" { "Description" }
        textarea id="description" name="description" rows="4" { (description) }

        label for="contact" { "Contact" }
        input type="text" id="contact" name="contact" value=(contact);

        label for="image_url" { "Image URL (optional)" }
        input type="text" id="image_url" name="image_url" value=(image_url);
    }
}
