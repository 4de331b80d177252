use maud::{html, Markup, DOCTYPE};

/// Everything the shared chrome needs to know about the viewer.
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    pub user_email: Option<String>,
    pub is_admin: bool,
}

pub fn desktop_layout(title: &str, chrome: &PageChrome, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Property Expert" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                        path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                        path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                    }
                    h3 { "Property Expert" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            @if chrome.user_email.is_some() {
                                li { a href="/add" { "Add Property" } }
                                li { a href="/my-properties" { "My Properties" } }
                            }
                            @if chrome.is_admin {
                                li { a href="/admin" { "Dashboard" } }
                            }
                        }
                    }

                    @match &chrome.user_email {
                        Some(email) => {
                            span class="text-sm" { (email) }
                            form action="/logout" method="post" style="display: inline; margin-left: 8px;" {
                                button type="submit" class="text-base font-medium" { "Logout" }
                            }
                        },
                        None => {
                            a href="/login" class="text-base font-medium hover:text-blue-600" { "Login" }
                            " "
                            a href="/signup" class="text-base font-medium hover:text-blue-600" { "Sign Up" }
                        },
                    }
                }
                (content)
            }
        }
    }
}
