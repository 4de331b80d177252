// templates/pages/edit_property.rs

use maud::{html, Markup};

use crate::domain::property::PropertyRecord;
use crate::templates::layouts::desktop::{desktop_layout, PageChrome};
use crate::templates::pages::add_property::property_form_fields;

pub fn edit_property_page(chrome: &PageChrome, property: &PropertyRecord) -> Markup {
    let price = property
        .price
        .map(|p| format!("{p}"))
        .unwrap_or_default();

    desktop_layout(
        "Edit Property",
        chrome,
        html! {
            main class="container narrow" {
                h1 { "Edit Property" }
                form action=(format!("/properties/{}/update", property.id)) method="post" {
                    (property_form_fields(
                        &property.title,
                        &price,
                        property.location.as_deref().unwrap_or(""),
                        property.description.as_deref().unwrap_or(""),
                        property.contact.as_deref().unwrap_or(""),
                        property.image_url.as_deref().unwrap_or(""),
                    ))
                    button type="submit" { "Save Changes" }
                    " "
                    a href="/my-properties" { "Cancel" }
                }
            }
        },
    )
}
