// templates/pages/admin_login.rs

use maud::{html, Markup};

use crate::templates::layouts::desktop::{desktop_layout, PageChrome};

pub fn admin_login_page(error: Option<&str>) -> Markup {
    desktop_layout(
        "Admin Login",
        &PageChrome::default(),
        html! {
            main class="container narrow" {
                h1 { "Admin Login" }
                @if let Some(msg) = error {
                    p class="alert alert-danger" { (msg) }
                }
                form action="/admin/login" method="post" {
                    label for="email" { "Admin Email" }
                    input type="email" id="email" name="email" required;

                    label for="password" { "Password" }
                    input type="password" id="password" name="password" required;

                    button type="submit" { "Login" }
                }
            }
        },
    )
}
