// src/jobs.rs
//
// Scheduled report pipeline: accessors -> aggregator/selector -> sink.
// Runs once at boot and then on a fixed interval; the admin page can
// also trigger it by hand. A failed run is logged and the next tick
// simply tries again; the sink itself never retries.

use std::thread;
use std::time::Duration;

use crate::db::connection::Database;
use crate::db::{properties, reports, users};
use crate::errors::ServerError;
use crate::stats::report::{build_report, AggregateReport};

/// One full pipeline run against the current store contents.
pub fn run_report_job(db: &Database, now: i64) -> Result<AggregateReport, ServerError> {
    db.with_conn(|conn| {
        let all_properties = properties::list_all(conn)?;
        let all_users = users::list_all(conn)?;

        let report = build_report(&all_properties, &all_users, now);

        reports::save_latest(conn, &report)?;
        Ok(report)
    })
}

pub fn now_unix() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Detached scheduler thread. The handle is returned for symmetry but
/// the thread runs for the life of the process.
pub fn spawn_report_scheduler(db: Database, interval_secs: u64) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        match run_report_job(&db, now_unix()) {
            Ok(report) => println!(
                "📊 Report generated: {} properties, {} owners",
                report.totals.property_count, report.totals.distinct_user_count
            ),
            Err(e) => eprintln!("❌ Report generation failed: {e}"),
        }
        thread::sleep(Duration::from_secs(interval_secs));
    })
}
