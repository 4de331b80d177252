// src/db/properties.rs
//
// Property Record Accessor. All reads funnel through `row_to_property`,
// which is the single point where the loosely typed `created_at` and
// `price` columns get normalized. Nothing downstream sees a raw store
// value.

use crate::auth::tokens::new_record_id;
use crate::domain::normalize;
use crate::domain::property::{derive_search_terms, PropertyRecord};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

const PROPERTY_COLS: &str =
    "id, title, location, description, contact, price, image_url, owner_user_id, search_terms, created_at";

/// Fields accepted from the add/edit forms. The id, search terms and
/// creation time are store concerns, assigned here.
#[derive(Debug, Clone, Default)]
pub struct PropertyInput {
    pub title: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

impl PropertyInput {
    fn search_terms_json(&self) -> Result<String, ServerError> {
        let terms = derive_search_terms(&self.title, self.location.as_deref().unwrap_or(""));
        serde_json::to_string(&terms).map_err(|_| ServerError::InternalError)
    }
}

/// Insert a new property, minting its id and stamping `created_at`.
/// Returns the new id.
pub fn insert_property(
    conn: &Connection,
    input: &PropertyInput,
    owner_user_id: Option<i64>,
    now: i64,
) -> Result<String, ServerError> {
    let id = new_record_id();
    let terms = input.search_terms_json()?;

    conn.execute(
        r#"
        insert into properties
            (id, title, location, description, contact, price, image_url,
             owner_user_id, search_terms, created_at)
        values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
        params![
            id,
            input.title,
            input.location,
            input.description,
            input.contact,
            input.price,
            input.image_url,
            owner_user_id,
            terms,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert property failed: {e}")))?;

    Ok(id)
}

/// Overwrite the editable fields of an existing property and re-derive
/// its search terms. Ownership checks are the caller's job.
pub fn update_property(
    conn: &Connection,
    id: &str,
    input: &PropertyInput,
) -> Result<(), ServerError> {
    let terms = input.search_terms_json()?;

    let updated = conn
        .execute(
            r#"
            update properties set
                title = ?1, location = ?2, description = ?3, contact = ?4,
                price = ?5, image_url = ?6, search_terms = ?7
            where id = ?8
            "#,
            params![
                input.title,
                input.location,
                input.description,
                input.contact,
                input.price,
                input.image_url,
                terms,
                id,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update property failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn delete_property(conn: &Connection, id: &str) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from properties where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete property failed: {e}")))?;

    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn get_by_id(conn: &Connection, id: &str) -> Result<Option<PropertyRecord>, ServerError> {
    conn.query_row(
        &format!("select {PROPERTY_COLS} from properties where id = ?"),
        params![id],
        row_to_property,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select property failed: {e}")))
}

/// The full collection, in store order. Sole data source for aggregates.
pub fn list_all(conn: &Connection) -> Result<Vec<PropertyRecord>, ServerError> {
    query_properties(
        conn,
        &format!("select {PROPERTY_COLS} from properties order by rowid"),
        [],
    )
}

pub fn list_by_owner(
    conn: &Connection,
    owner_user_id: i64,
) -> Result<Vec<PropertyRecord>, ServerError> {
    query_properties(
        conn,
        &format!("select {PROPERTY_COLS} from properties where owner_user_id = ? order by rowid"),
        params![owner_user_id],
    )
}

/// Store-side order-and-limit read used by the live dashboard's
/// recent-listings pane.
pub fn recent(conn: &Connection, limit: i64) -> Result<Vec<PropertyRecord>, ServerError> {
    query_properties(
        conn,
        &format!(
            "select {PROPERTY_COLS} from properties
             order by created_at desc nulls last limit ?"
        ),
        params![limit],
    )
}

/// Token-membership search on the stored search terms (the store-side
/// search path; the dashboard's substring filter lives in stats::search).
/// Matching is exact-token: the lowercased query must equal one stored
/// term, which the JSON encoding lets us test with a quoted substring.
pub fn search_by_term(conn: &Connection, term: &str) -> Result<Vec<PropertyRecord>, ServerError> {
    let needle = format!("\"{}\"", term.trim().to_lowercase());
    query_properties(
        conn,
        &format!(
            "select {PROPERTY_COLS} from properties
             where instr(search_terms, ?1) > 0
             order by created_at desc nulls last"
        ),
        params![needle],
    )
}

pub fn count_all(conn: &Connection) -> Result<i64, ServerError> {
    conn.query_row("select count(*) from properties", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("count properties failed: {e}")))
}

/// How many properties were created at or after `since` (unix seconds).
/// Counted in Rust over normalized timestamps so that epoch-millis and
/// text rows are compared correctly; undated rows never match.
pub fn count_created_since(conn: &Connection, since: i64) -> Result<i64, ServerError> {
    let mut stmt = conn
        .prepare("select created_at from properties")
        .map_err(|e| ServerError::DbError(format!("prepare recency count failed: {e}")))?;

    let mut rows = stmt
        .query([])
        .map_err(|e| ServerError::DbError(format!("query recency count failed: {e}")))?;

    let mut count = 0i64;
    while let Some(row) = rows
        .next()
        .map_err(|e| ServerError::DbError(e.to_string()))?
    {
        let raw = row
            .get_ref(0)
            .map_err(|e| ServerError::DbError(e.to_string()))?;
        if matches!(normalize::created_at(raw), Some(ts) if ts >= since) {
            count += 1;
        }
    }
    Ok(count)
}

fn query_properties<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<PropertyRecord>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(format!("prepare properties failed: {e}")))?;

    let rows = stmt
        .query_map(params, row_to_property)
        .map_err(|e| ServerError::DbError(format!("query properties failed: {e}")))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

fn row_to_property(row: &rusqlite::Row) -> rusqlite::Result<PropertyRecord> {
    let terms_json: String = row.get(8)?;

    Ok(PropertyRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        location: row.get(2)?,
        description: row.get(3)?,
        contact: row.get(4)?,
        price: normalize::price(row.get_ref(5)?),
        image_url: row.get(6)?,
        owner_user_id: row.get(7)?,
        // A hand-edited terms column shouldn't take the row down.
        search_terms: serde_json::from_str(&terms_json).unwrap_or_default(),
        created_at: normalize::created_at(row.get_ref(9)?),
    })
}
