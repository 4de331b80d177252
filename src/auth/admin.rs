// src/auth/admin.rs

/// Allowlist admin check: the only thing that makes an account an admin
/// is its email appearing in the configured list. No role column, no
/// token claims. The list arrives via `AppConfig`, never as a literal at
/// the call site.
pub fn is_admin_email(allowlist: &[String], email: &str) -> bool {
    let email = email.trim().to_lowercase();
    allowlist.iter().any(|a| a.trim().to_lowercase() == email)
}
