// src/domain/user.rs

use serde::{Deserialize, Serialize};

/// An account as the dashboard and search see it. Credential material
/// never leaves the db layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    /// Unix seconds.
    pub created_at: Option<i64>,
}
