// src/db/reports.rs
//
// Report Sink. One persisted slot, overwritten whole on every run; the
// upsert is a single statement, so a reader never observes a partial
// report. Failures propagate to the caller; retry policy is the
// scheduler's business, not ours.

use crate::errors::ServerError;
use crate::stats::report::AggregateReport;
use rusqlite::{params, Connection, OptionalExtension};

pub const LATEST_REPORT_ID: &str = "latest";

pub fn save_latest(conn: &Connection, report: &AggregateReport) -> Result<(), ServerError> {
    let json = serde_json::to_string(report)
        .map_err(|e| ServerError::DbError(format!("serialize report failed: {e}")))?;

    conn.execute(
        r#"
        insert into reports (id, generated_at, report_json)
        values (?1, ?2, ?3)
        on conflict(id) do update set
            generated_at = excluded.generated_at,
            report_json = excluded.report_json
        "#,
        params![LATEST_REPORT_ID, report.generated_at, json],
    )
    .map_err(|e| ServerError::DbError(format!("save report failed: {e}")))?;

    Ok(())
}

pub fn load_latest(conn: &Connection) -> Result<Option<AggregateReport>, ServerError> {
    let json: Option<String> = conn
        .query_row(
            "select report_json from reports where id = ?",
            params![LATEST_REPORT_ID],
            |r| r.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("load report failed: {e}")))?;

    match json {
        Some(json) => {
            let report = serde_json::from_str(&json)
                .map_err(|e| ServerError::DbError(format!("decode stored report failed: {e}")))?;
            Ok(Some(report))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::report::build_report;

    fn apply_schema(conn: &Connection) {
        conn.execute_batch(include_str!("../../sql/schema.sql")).unwrap();
    }

    #[test]
    fn empty_sink_loads_none() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        assert!(load_latest(&conn).unwrap().is_none());
    }

    #[test]
    fn latest_slot_is_overwritten_not_appended() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);

        let first = build_report(&[], &[], 1_000);
        save_latest(&conn, &first).unwrap();

        let second = build_report(&[], &[], 2_000);
        save_latest(&conn, &second).unwrap();

        let loaded = load_latest(&conn).unwrap().unwrap();
        assert_eq!(loaded.generated_at, 2_000);

        let rows: i64 = conn
            .query_row("select count(*) from reports", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn report_roundtrips_through_the_sink() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);

        let props = vec![crate::domain::property::PropertyRecord {
            id: "p1".to_string(),
            title: "Flat".to_string(),
            location: Some("Delhi".to_string()),
            description: None,
            contact: None,
            price: Some(1_500_000.0),
            image_url: None,
            owner_user_id: Some(1),
            search_terms: vec!["flat".to_string()],
            created_at: Some(1_700_000_000),
        }];
        let report = build_report(&props, &[], 1_700_000_100);

        save_latest(&conn, &report).unwrap();
        let loaded = load_latest(&conn).unwrap().unwrap();
        assert_eq!(loaded, report);
    }
}
