// src/db/users.rs
use crate::domain::user::UserRecord;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

/// What the login path needs to check a password.
#[derive(Debug, Clone)]
pub struct CredentialRow {
    pub user_id: i64,
    pub email: String,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

/// Insert a new account. Email should already be normalized by caller
/// (trim/lowercase). A duplicate email is a BadRequest, not a DbError.
pub fn create_user(
    conn: &Connection,
    email: &str,
    name: Option<&str>,
    phone: Option<&str>,
    salt: &[u8],
    hash: &[u8],
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into users (email, name, phone, password_salt, password_hash, created_at)
        values (?, ?, ?, ?, ?, ?)
        "#,
        params![email, name, phone, salt, hash, now],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            ServerError::BadRequest("an account with this email already exists".into())
        }
        other => ServerError::DbError(format!("insert user failed: {other}")),
    })?;

    Ok(conn.last_insert_rowid())
}

pub fn find_credentials(
    conn: &Connection,
    email: &str,
) -> Result<Option<CredentialRow>, ServerError> {
    conn.query_row(
        "select id, email, password_salt, password_hash from users where email = ?",
        params![email],
        |r| {
            Ok(CredentialRow {
                user_id: r.get(0)?,
                email: r.get(1)?,
                salt: r.get(2)?,
                hash: r.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select credentials failed: {e}")))
}

/// The User Record Accessor: the full users collection.
pub fn list_all(conn: &Connection) -> Result<Vec<UserRecord>, ServerError> {
    let mut stmt = conn
        .prepare("select id, email, name, phone, created_at from users order by id")
        .map_err(|e| ServerError::DbError(format!("prepare users failed: {e}")))?;

    let rows = stmt
        .query_map([], row_to_user)
        .map_err(|e| ServerError::DbError(format!("query users failed: {e}")))?;

    let mut users = Vec::new();
    for row in rows {
        users.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(users)
}

pub fn count_all(conn: &Connection) -> Result<i64, ServerError> {
    conn.query_row("select count(*) from users", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("count users failed: {e}")))
}

pub fn touch_last_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update users set last_login_at = ? where id = ?",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last_login_at failed: {e}")))?;
    Ok(())
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        phone: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password;

    fn apply_schema(conn: &Connection) {
        conn.execute_batch(include_str!("../../sql/schema.sql")).unwrap();
    }

    fn insert_user(conn: &Connection, email: &str, now: i64) -> i64 {
        let salt = password::new_salt();
        let hash = password::hash_password(&salt, "secret1");
        create_user(conn, email, Some("Test User"), None, &salt, &hash, now).unwrap()
    }

    #[test]
    fn duplicate_email_is_bad_request() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);

        insert_user(&conn, "a@b.com", 1000);
        let salt = password::new_salt();
        let hash = password::hash_password(&salt, "other");
        let err = create_user(&conn, "a@b.com", None, None, &salt, &hash, 1001).unwrap_err();
        match err {
            ServerError::BadRequest(_) => {}
            other => panic!("expected BadRequest, got: {:?}", other),
        }
    }

    #[test]
    fn credentials_roundtrip() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);

        let id = insert_user(&conn, "a@b.com", 1000);
        let creds = find_credentials(&conn, "a@b.com").unwrap().unwrap();
        assert_eq!(creds.user_id, id);
        assert!(password::verify(&creds.salt, &creds.hash, "secret1"));
        assert!(find_credentials(&conn, "nobody@b.com").unwrap().is_none());
    }

    #[test]
    fn list_all_returns_records_without_credentials() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);

        insert_user(&conn, "a@b.com", 1000);
        insert_user(&conn, "c@d.com", 1001);

        let users = list_all(&conn).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "a@b.com");
        assert_eq!(users[0].name.as_deref(), Some("Test User"));
        assert_eq!(count_all(&conn).unwrap(), 2);
    }
}
