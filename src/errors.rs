// errors.rs
use std::fmt;

/// Errors originating from either the server logic
/// (routing, authorization, bad input) or downstream layers (DB).
///
/// Malformed fields inside individual records never surface here:
/// they are normalized away at the accessor boundary and aggregation
/// continues over the remaining fields and records.
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    /// Not signed in, or the session expired.
    Unauthorized(String),
    /// Signed in, but not allowed to touch this resource.
    Forbidden(String),
    DbError(String),
    InternalError,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            ServerError::Forbidden(msg) => write!(f, "Access denied: {msg}"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}
