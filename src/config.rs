// src/config.rs
use crate::db::connection::Database;

/// Runtime configuration. Everything that used to float around as a
/// module-level constant (admin email list included) lives here and is
/// injected through [`App`] into every handler.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to, e.g. "127.0.0.1:3000".
    pub bind_addr: String,
    /// Path of the SQLite database file.
    pub db_path: String,
    /// Emails allowed into the admin dashboard. Compared after
    /// trim + lowercase.
    pub admin_emails: Vec<String>,
    /// Interval between scheduled report runs, in seconds.
    pub report_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            db_path: "property_expert.sqlite3".to_string(),
            admin_emails: vec!["admin@gmail.com".to_string()],
            report_interval_secs: 30 * 60,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by environment variables where present:
    /// PE_BIND, PE_DB_PATH, PE_ADMIN_EMAILS (comma-separated),
    /// PE_REPORT_INTERVAL_SECS.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("PE_BIND") {
            cfg.bind_addr = v;
        }
        if let Ok(v) = std::env::var("PE_DB_PATH") {
            cfg.db_path = v;
        }
        if let Ok(v) = std::env::var("PE_ADMIN_EMAILS") {
            let emails: Vec<String> = v
                .split(',')
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect();
            if !emails.is_empty() {
                cfg.admin_emails = emails;
            }
        }
        if let Ok(v) = std::env::var("PE_REPORT_INTERVAL_SECS") {
            if let Ok(n) = v.parse::<u64>() {
                cfg.report_interval_secs = n.max(1);
            }
        }

        cfg
    }
}

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct App {
    pub db: Database,
    pub cfg: AppConfig,
}
