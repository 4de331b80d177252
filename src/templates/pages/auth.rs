// templates/pages/auth.rs

use maud::{html, Markup};

use crate::templates::layouts::desktop::{desktop_layout, PageChrome};

pub fn login_page(error: Option<&str>) -> Markup {
    desktop_layout(
        "Login",
        &PageChrome::default(),
        html! {
            main class="container narrow" {
                h1 { "Login" }
                @if let Some(msg) = error {
                    p class="alert alert-danger" { (msg) }
                }
                form action="/login" method="post" {
                    label for="email" { "Email" }
                    input type="email" id="email" name="email" required;

                    label for="password" { "Password" }
                    input type="password" id="password" name="password" required;

                    button type="submit" { "Login" }
                }
                p { "No account yet? " a href="/signup" { "Sign up" } }
            }
        },
    )
}

pub fn signup_page(error: Option<&str>) -> Markup {
    desktop_layout(
        "Sign Up",
        &PageChrome::default(),
        html! {
            main class="container narrow" {
                h1 { "Create Account" }
                @if let Some(msg) = error {
                    p class="alert alert-danger" { (msg) }
                }
                form action="/signup" method="post" {
                    label for="email" { "Email" }
                    input type="email" id="email" name="email" required;

                    label for="name" { "Name (optional)" }
                    input type="text" id="name" name="name";

                    label for="phone" { "Phone (optional)" }
                    input type="tel" id="phone" name="phone";

                    label for="password" { "Password" }
                    input type="password" id="password" name="password" required;

                    label for="confirm" { "Confirm Password" }
                    input type="password" id="confirm" name="confirm" required;

                    button type="submit" { "Sign Up" }
                }
            }
        },
    )
}
